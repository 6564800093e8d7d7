//! Geo-spatial filters.
//!
//! Points are `(lat, lon)` pairs. They are written as `"lat, lon"` strings.

use crate::options::{DistanceType, GeoExecution, GeoOptimizeBBox, GeoShapeRelation, GeoUnit};
use crate::path::FieldRef;

/// Points inside a box given by two corners.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct GeoBoundingBoxFilter {
    /// Geo-point field.
    pub field: Option<FieldRef>,
    /// Top-left corner.
    pub top_left: Option<(f64, f64)>,
    /// Bottom-right corner.
    pub bottom_right: Option<(f64, f64)>,
    /// Execution strategy.
    pub execution: Option<GeoExecution>,
}

impl GeoBoundingBoxFilter {
    /// Set the field.
    pub fn on_field(mut self, field: impl Into<FieldRef>) -> Self {
        self.field = Some(field.into());
        self
    }

    /// Set the top-left corner.
    pub fn top_left(mut self, lat: f64, lon: f64) -> Self {
        self.top_left = Some((lat, lon));
        self
    }

    /// Set the bottom-right corner.
    pub fn bottom_right(mut self, lat: f64, lon: f64) -> Self {
        self.bottom_right = Some((lat, lon));
        self
    }

    /// Set the execution strategy.
    pub fn execution(mut self, execution: GeoExecution) -> Self {
        self.execution = Some(execution);
        self
    }
}

/// Points within a distance of a location.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct GeoDistanceFilter {
    /// Geo-point field.
    pub field: Option<FieldRef>,
    /// Center.
    pub location: Option<(f64, f64)>,
    /// Radius.
    pub distance: Option<(f64, GeoUnit)>,
    /// Distance computation.
    pub distance_type: Option<DistanceType>,
    /// Bounding box pre-check.
    pub optimize_bbox: Option<GeoOptimizeBBox>,
}

impl GeoDistanceFilter {
    /// Set the field.
    pub fn on_field(mut self, field: impl Into<FieldRef>) -> Self {
        self.field = Some(field.into());
        self
    }

    /// Set the center.
    pub fn location(mut self, lat: f64, lon: f64) -> Self {
        self.location = Some((lat, lon));
        self
    }

    /// Set the radius.
    pub fn distance(mut self, value: f64, unit: GeoUnit) -> Self {
        self.distance = Some((value, unit));
        self
    }

    /// Set the distance computation.
    pub fn distance_type(mut self, distance_type: DistanceType) -> Self {
        self.distance_type = Some(distance_type);
        self
    }

    /// Set the bounding box pre-check.
    pub fn optimize(mut self, optimize: GeoOptimizeBBox) -> Self {
        self.optimize_bbox = Some(optimize);
        self
    }
}

/// Points within a distance band around a location.
#[derive(Debug, Clone, PartialEq)]
pub struct GeoDistanceRangeFilter {
    /// Geo-point field.
    pub field: Option<FieldRef>,
    /// Center.
    pub location: Option<(f64, f64)>,
    /// Inner radius.
    pub from: Option<f64>,
    /// Outer radius.
    pub to: Option<f64>,
    /// Unit of `from` and `to`.
    pub unit: Option<GeoUnit>,
    /// Whether the inner radius is inclusive.
    pub include_lower: bool,
    /// Whether the outer radius is inclusive.
    pub include_upper: bool,
    /// Distance computation.
    pub distance_type: Option<DistanceType>,
    /// Bounding box pre-check.
    pub optimize_bbox: Option<GeoOptimizeBBox>,
}

impl Default for GeoDistanceRangeFilter {
    fn default() -> Self {
        Self {
            field: None,
            location: None,
            from: None,
            to: None,
            unit: None,
            include_lower: true,
            include_upper: true,
            distance_type: None,
            optimize_bbox: None,
        }
    }
}

impl GeoDistanceRangeFilter {
    /// Set the field.
    pub fn on_field(mut self, field: impl Into<FieldRef>) -> Self {
        self.field = Some(field.into());
        self
    }

    /// Set the center.
    pub fn location(mut self, lat: f64, lon: f64) -> Self {
        self.location = Some((lat, lon));
        self
    }

    /// Set both radii and their unit.
    pub fn distance(mut self, from: f64, to: f64, unit: GeoUnit) -> Self {
        self.from = Some(from);
        self.to = Some(to);
        self.unit = Some(unit);
        self
    }

    /// Set the inner radius.
    pub fn from(mut self, from: f64) -> Self {
        self.from = Some(from);
        self
    }

    /// Set the outer radius.
    pub fn to(mut self, to: f64) -> Self {
        self.to = Some(to);
        self
    }

    /// Set the unit.
    pub fn unit(mut self, unit: GeoUnit) -> Self {
        self.unit = Some(unit);
        self
    }

    /// Exclude the inner radius.
    pub fn from_exclusive(mut self) -> Self {
        self.include_lower = false;
        self
    }

    /// Exclude the outer radius.
    pub fn to_exclusive(mut self) -> Self {
        self.include_upper = false;
        self
    }

    /// Set the distance computation.
    pub fn distance_type(mut self, distance_type: DistanceType) -> Self {
        self.distance_type = Some(distance_type);
        self
    }

    /// Set the bounding box pre-check.
    pub fn optimize(mut self, optimize: GeoOptimizeBBox) -> Self {
        self.optimize_bbox = Some(optimize);
        self
    }
}

/// Points inside a polygon.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct GeoPolygonFilter {
    /// Geo-point field.
    pub field: Option<FieldRef>,
    /// Polygon vertices, in order.
    pub points: Vec<(f64, f64)>,
}

impl GeoPolygonFilter {
    /// Create a polygon filter.
    pub fn new(field: impl Into<FieldRef>, points: impl IntoIterator<Item = (f64, f64)>) -> Self {
        Self {
            field: Some(field.into()),
            points: points.into_iter().collect(),
        }
    }

    /// Append a vertex.
    pub fn point(mut self, lat: f64, lon: f64) -> Self {
        self.points.push((lat, lon));
        self
    }
}

/// Shapes related to an inline GeoJSON-style shape.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct GeoShapeFilter {
    /// Geo-shape field.
    pub field: Option<FieldRef>,
    /// Shape type such as `envelope` or `polygon`.
    pub shape_type: Option<String>,
    /// Shape coordinates as `[lon, lat]` positions.
    pub coordinates: Vec<Vec<f64>>,
    /// Spatial relation.
    pub relation: Option<GeoShapeRelation>,
}

impl GeoShapeFilter {
    /// Set the field.
    pub fn on_field(mut self, field: impl Into<FieldRef>) -> Self {
        self.field = Some(field.into());
        self
    }

    /// Set the shape type.
    pub fn shape_type(mut self, shape_type: impl Into<String>) -> Self {
        self.shape_type = Some(shape_type.into());
        self
    }

    /// Set the coordinates.
    pub fn coordinates<I, P>(mut self, coordinates: I) -> Self
    where
        I: IntoIterator<Item = P>,
        P: IntoIterator<Item = f64>,
    {
        self.coordinates = coordinates.into_iter().map(|p| p.into_iter().collect()).collect();
        self
    }

    /// Set the spatial relation.
    pub fn relation(mut self, relation: GeoShapeRelation) -> Self {
        self.relation = Some(relation);
        self
    }
}
