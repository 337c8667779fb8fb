//! Drag handles: classifying a pointer press and resolving each drag step.

use crate::aspect;
use crate::bounds::BoundsResolver;
use crate::edge::{Edge, EdgeSet};
use crate::geometry::Point;

/// Per-axis distance within which a press grabs a corner or a side.
pub const TOUCH_TOLERANCE: f32 = 24.0;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Corner {
    TopLeft,
    TopRight,
    BottomLeft,
    BottomRight,
}

impl Corner {
    pub const ALL: [Corner; 4] = [
        Corner::TopLeft,
        Corner::TopRight,
        Corner::BottomLeft,
        Corner::BottomRight,
    ];

    /// The vertical and horizontal sides meeting at this corner.
    pub fn edges(self) -> (Edge, Edge) {
        match self {
            Corner::TopLeft => (Edge::Left, Edge::Top),
            Corner::TopRight => (Edge::Right, Edge::Top),
            Corner::BottomLeft => (Edge::Left, Edge::Bottom),
            Corner::BottomRight => (Edge::Right, Edge::Bottom),
        }
    }

    pub fn position(self, edges: &EdgeSet) -> Point {
        let (x, y) = self.edges();
        Point::new(edges.get(x), edges.get(y))
    }

    /// Growth direction away from the opposite corner, as `(sx, sy)`.
    fn direction(self) -> (f32, f32) {
        match self {
            Corner::TopLeft => (-1.0, -1.0),
            Corner::TopRight => (1.0, -1.0),
            Corner::BottomLeft => (-1.0, 1.0),
            Corner::BottomRight => (1.0, 1.0),
        }
    }

    fn opposite(self) -> Corner {
        match self {
            Corner::TopLeft => Corner::BottomRight,
            Corner::TopRight => Corner::BottomLeft,
            Corner::BottomLeft => Corner::TopRight,
            Corner::BottomRight => Corner::TopLeft,
        }
    }
}

/// What a drag gesture manipulates. A press that grabs nothing is `None` at
/// the call site (`Option<DragHandle>`).
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum DragHandle {
    MoveWindow,
    ResizeCorner(Corner),
    ResizeEdge(Edge),
}

impl DragHandle {
    /// Resolves one drag step.
    ///
    /// `start` is the window when the gesture began and `(dx, dy)` the total
    /// pointer travel since then. `lock` carries the width/height ratio when
    /// aspect lock is on. `None` means the step cannot be honored and the
    /// current window must stay as it is.
    pub fn resolve(
        self,
        start: &EdgeSet,
        dx: f32,
        dy: f32,
        resolver: &BoundsResolver,
        lock: Option<f32>,
    ) -> Option<EdgeSet> {
        match self {
            DragHandle::MoveWindow => Some(resolver.translate(start, dx, dy)),
            DragHandle::ResizeCorner(corner) => resolve_corner(corner, start, dx, dy, resolver, lock),
            DragHandle::ResizeEdge(edge) => resolve_edge(edge, start, dx, dy, resolver, lock),
        }
    }
}

fn resolve_corner(
    corner: Corner,
    start: &EdgeSet,
    dx: f32,
    dy: f32,
    resolver: &BoundsResolver,
    lock: Option<f32>,
) -> Option<EdgeSet> {
    let (x_edge, y_edge) = corner.edges();
    match lock {
        None => {
            let mut out = *start;
            out.set(x_edge, resolver.resolve_side(x_edge, start, start.get(x_edge) + dx));
            out.set(y_edge, resolver.resolve_side(y_edge, start, start.get(y_edge) + dy));
            Some(out)
        }
        Some(ratio) => {
            let anchor = corner.opposite().position(start);
            let dragged = corner.position(start);
            let (sx, sy) = corner.direction();
            let raw_w = (dragged.x + dx - anchor.x) * sx;
            let raw_h = (dragged.y + dy - anchor.y) * sy;
            let desired = aspect::project_height(raw_w, raw_h, ratio);
            resolver.resolve_anchored(anchor, sx, sy, desired, ratio)
        }
    }
}

fn resolve_edge(
    edge: Edge,
    start: &EdgeSet,
    dx: f32,
    dy: f32,
    resolver: &BoundsResolver,
    lock: Option<f32>,
) -> Option<EdgeSet> {
    let delta = if edge.is_vertical_line() { dx } else { dy };
    let proposed = start.get(edge) + delta;
    match lock {
        None => {
            let mut out = *start;
            out.set(edge, resolver.resolve_side(edge, start, proposed));
            Some(out)
        }
        Some(ratio) => {
            // Past the opposite side the span is zero and resolves to the minimum.
            let outward = if matches!(edge, Edge::Right | Edge::Bottom) { 1.0 } else { -1.0 };
            let span = ((proposed - start.get(edge.opposite())) * outward).max(0.0);
            let desired = if edge.is_vertical_line() {
                span / ratio
            } else {
                span
            };
            resolver.resolve_locked_side(edge, start, desired, ratio)
        }
    }
}

/// Classifies a press at `p` against the current window.
///
/// Corners win over sides and sides over the interior. When several corners
/// or sides are in reach of a small window, the nearest one is taken.
pub fn hit_test(p: Point, edges: &EdgeSet, tolerance: f32) -> Option<DragHandle> {
    let corner = Corner::ALL
        .into_iter()
        .filter_map(|c| {
            let pos = c.position(edges);
            let (ddx, ddy) = ((p.x - pos.x).abs(), (p.y - pos.y).abs());
            (ddx <= tolerance && ddy <= tolerance).then_some((c, ddx * ddx + ddy * ddy))
        })
        .min_by(|a, b| a.1.total_cmp(&b.1));
    if let Some((c, _)) = corner {
        return Some(DragHandle::ResizeCorner(c));
    }

    let within_x = p.x >= edges.left && p.x <= edges.right;
    let within_y = p.y >= edges.top && p.y <= edges.bottom;
    let side = Edge::ALL
        .into_iter()
        .filter_map(|e| {
            let (distance, along) = if e.is_vertical_line() {
                ((p.x - edges.get(e)).abs(), within_y)
            } else {
                ((p.y - edges.get(e)).abs(), within_x)
            };
            (along && distance <= tolerance).then_some((e, distance))
        })
        .min_by(|a, b| a.1.total_cmp(&b.1));
    if let Some((e, _)) = side {
        return Some(DragHandle::ResizeEdge(e));
    }

    if within_x && within_y {
        return Some(DragHandle::MoveWindow);
    }

    None
}
