//! Logical-to-physical position mapping.

use std::sync::{Arc, PoisonError, RwLock};

use droidctl_types::{LogicalPosition, PhysicalPoint, Size};
use tracing::info;

/// Converts a position in capture space to a physical display point.
///
/// Installed by the capture session, which knows the current frame size,
/// display size and rotation. Returns `None` for positions it cannot map.
pub trait PositionMapper: Send + Sync {
    fn map(&self, position: &LogicalPosition) -> Option<PhysicalPoint>;
}

impl<F> PositionMapper for F
where
    F: Fn(&LogicalPosition) -> Option<PhysicalPoint> + Send + Sync,
{
    fn map(&self, position: &LogicalPosition) -> Option<PhysicalPoint> {
        self(position)
    }
}

/// Scales from the capture frame size to the physical display size.
///
/// Positions expressed in any other frame size are rejected: they were
/// produced against a frame that is no longer current (the capture was
/// resized or rotated in between).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ScalingMapper {
    capture_size: Size,
    display_size: Size,
}

impl ScalingMapper {
    #[must_use]
    pub fn new(capture_size: Size, display_size: Size) -> Self {
        Self {
            capture_size,
            display_size,
        }
    }
}

impl PositionMapper for ScalingMapper {
    fn map(&self, position: &LogicalPosition) -> Option<PhysicalPoint> {
        if position.screen_size != self.capture_size
            || self.capture_size.width == 0
            || self.capture_size.height == 0
        {
            return None;
        }
        let scale = |v: i32, to: u32, from: u32| {
            i32::try_from(i64::from(v) * i64::from(to) / i64::from(from)).ok()
        };
        let x = scale(
            position.point.x,
            self.display_size.width,
            self.capture_size.width,
        )?;
        let y = scale(
            position.point.y,
            self.display_size.height,
            self.capture_size.height,
        )?;
        Some(PhysicalPoint::new(x, y))
    }
}

/// Single-slot holder of the active [`PositionMapper`].
///
/// Replacing the mapper is last-write-wins. A resolve that races with a
/// replacement uses either the old or the new mapper for the whole call.
#[derive(Default)]
pub struct CoordinateResolver {
    mapper: RwLock<Option<Arc<dyn PositionMapper>>>,
}

impl CoordinateResolver {
    pub fn new() -> Self {
        Self::default()
    }

    /// Install a mapper, replacing any previous one.
    pub fn set_mapper(&self, mapper: Arc<dyn PositionMapper>) {
        *self.mapper.write().unwrap_or_else(PoisonError::into_inner) = Some(mapper);
        info!("position mapper installed");
    }

    /// Remove the installed mapper.
    pub fn clear_mapper(&self) {
        *self.mapper.write().unwrap_or_else(PoisonError::into_inner) = None;
    }

    /// Whether a mapper is installed.
    pub fn has_mapper(&self) -> bool {
        self.current().is_some()
    }

    /// Map a position to physical display space.
    ///
    /// Returns `None` if no mapper is installed or the mapper rejects the
    /// position.
    pub fn resolve(&self, position: &LogicalPosition) -> Option<PhysicalPoint> {
        // Read the slot once; the lock is released before mapping.
        let mapper = self.current()?;
        mapper.map(position)
    }

    fn current(&self) -> Option<Arc<dyn PositionMapper>> {
        self.mapper
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }
}

impl std::fmt::Debug for CoordinateResolver {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CoordinateResolver")
            .field("has_mapper", &self.has_mapper())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use droidctl_types::Point;

    fn pos(x: i32, y: i32, w: u32, h: u32) -> LogicalPosition {
        LogicalPosition::new(Point::new(x, y), Size::new(w, h))
    }

    fn offset_mapper(dx: i32) -> Arc<dyn PositionMapper> {
        Arc::new(move |p: &LogicalPosition| Some(PhysicalPoint::new(p.point.x + dx, p.point.y)))
    }

    #[test]
    fn unavailable_without_mapper() {
        let resolver = CoordinateResolver::new();
        assert!(!resolver.has_mapper());
        assert_eq!(resolver.resolve(&pos(1, 2, 10, 10)), None);
    }

    #[test]
    fn delegates_to_installed_mapper() {
        let resolver = CoordinateResolver::new();
        resolver.set_mapper(offset_mapper(100));
        assert_eq!(
            resolver.resolve(&pos(1, 2, 10, 10)),
            Some(PhysicalPoint::new(101, 2))
        );
    }

    #[test]
    fn last_write_wins() {
        let resolver = CoordinateResolver::new();
        resolver.set_mapper(offset_mapper(100));
        resolver.set_mapper(offset_mapper(200));
        assert_eq!(
            resolver.resolve(&pos(1, 2, 10, 10)),
            Some(PhysicalPoint::new(201, 2))
        );
    }

    #[test]
    fn clear_makes_resolver_unavailable() {
        let resolver = CoordinateResolver::new();
        resolver.set_mapper(offset_mapper(1));
        resolver.clear_mapper();
        assert_eq!(resolver.resolve(&pos(1, 2, 10, 10)), None);
    }

    #[test]
    fn concurrent_swap_never_mixes_mappers() {
        let resolver = CoordinateResolver::new();
        resolver.set_mapper(offset_mapper(1000));

        std::thread::scope(|s| {
            s.spawn(|| {
                for i in 0..500 {
                    let dx = if i % 2 == 0 { 2000 } else { 1000 };
                    resolver.set_mapper(offset_mapper(dx));
                }
            });
            for _ in 0..4 {
                s.spawn(|| {
                    for _ in 0..500 {
                        let p = resolver.resolve(&pos(5, 7, 10, 10)).unwrap();
                        assert!(p.x == 1005 || p.x == 2005, "unexpected x {}", p.x);
                        assert_eq!(p.y, 7);
                    }
                });
            }
        });
    }

    #[test]
    fn scaling_mapper_scales_to_display() {
        let mapper = ScalingMapper::new(Size::new(540, 1200), Size::new(1080, 2400));
        assert_eq!(
            mapper.map(&pos(270, 600, 540, 1200)),
            Some(PhysicalPoint::new(540, 1200))
        );
    }

    #[test]
    fn scaling_mapper_rejects_stale_frame_size() {
        let mapper = ScalingMapper::new(Size::new(540, 1200), Size::new(1080, 2400));
        assert_eq!(mapper.map(&pos(270, 600, 1200, 540)), None);
    }

    #[test]
    fn scaling_mapper_rejects_empty_frame() {
        let mapper = ScalingMapper::new(Size::new(0, 0), Size::new(1080, 2400));
        assert_eq!(mapper.map(&pos(0, 0, 0, 0)), None);
    }
}
