//! Range filters.
//!
//! Both bounds are optional and inclusive unless made exclusive. Setting a
//! bound through `greater_than` / `lower_than` sets the value and the
//! inclusivity in one call.

use crate::path::FieldRef;
use crate::value::FilterValue;

/// Bounds shared by the range variants.
#[derive(Debug, Clone, PartialEq)]
pub struct RangeBounds {
    /// Lower bound.
    pub from: Option<FilterValue>,
    /// Upper bound.
    pub to: Option<FilterValue>,
    /// Whether the lower bound matches itself.
    pub include_lower: bool,
    /// Whether the upper bound matches itself.
    pub include_upper: bool,
}

impl Default for RangeBounds {
    fn default() -> Self {
        Self {
            from: None,
            to: None,
            include_lower: true,
            include_upper: true,
        }
    }
}

impl RangeBounds {
    /// Check if neither bound is set.
    pub fn is_unbounded(&self) -> bool {
        self.from.is_none() && self.to.is_none()
    }
}

macro_rules! range_configurator {
    ($ty:ident) => {
        impl $ty {
            /// Set the field.
            pub fn on_field(mut self, field: impl Into<FieldRef>) -> Self {
                self.field = Some(field.into());
                self
            }

            /// Set the lower bound.
            pub fn from(mut self, from: impl Into<FilterValue>) -> Self {
                self.bounds.from = Some(from.into());
                self
            }

            /// Set the upper bound.
            pub fn to(mut self, to: impl Into<FilterValue>) -> Self {
                self.bounds.to = Some(to.into());
                self
            }

            /// Exclude the lower bound.
            pub fn from_exclusive(mut self) -> Self {
                self.bounds.include_lower = false;
                self
            }

            /// Exclude the upper bound.
            pub fn to_exclusive(mut self) -> Self {
                self.bounds.include_upper = false;
                self
            }

            /// Values strictly above `value`.
            pub fn greater_than(mut self, value: impl Into<FilterValue>) -> Self {
                self.bounds.from = Some(value.into());
                self.bounds.include_lower = false;
                self
            }

            /// Values at or above `value`.
            pub fn greater_or_equals(mut self, value: impl Into<FilterValue>) -> Self {
                self.bounds.from = Some(value.into());
                self.bounds.include_lower = true;
                self
            }

            /// Values strictly below `value`.
            pub fn lower_than(mut self, value: impl Into<FilterValue>) -> Self {
                self.bounds.to = Some(value.into());
                self.bounds.include_upper = false;
                self
            }

            /// Values at or below `value`.
            pub fn lower_or_equals(mut self, value: impl Into<FilterValue>) -> Self {
                self.bounds.to = Some(value.into());
                self.bounds.include_upper = true;
                self
            }
        }
    };
}

/// Range over string or numeric values.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RangeFilter {
    /// Field to bound.
    pub field: Option<FieldRef>,
    /// The bounds.
    pub bounds: RangeBounds,
}

/// Range over numeric values only.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct NumericRangeFilter {
    /// Field to bound.
    pub field: Option<FieldRef>,
    /// The bounds.
    pub bounds: RangeBounds,
}

range_configurator!(RangeFilter);
range_configurator!(NumericRangeFilter);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_inclusive_by_default() {
        let f = NumericRangeFilter::default().on_field("loc").from(10).to(20);
        assert!(f.bounds.include_lower);
        assert!(f.bounds.include_upper);
    }

    #[test]
    fn test_from_exclusive() {
        let f = NumericRangeFilter::default().from(10).to(20).from_exclusive();
        assert!(!f.bounds.include_lower);
        assert!(f.bounds.include_upper);
    }

    #[test]
    fn test_comparison_shortcuts() {
        let f = RangeFilter::default().greater_than("a").lower_or_equals("m");
        assert_eq!(f.bounds.from, Some("a".into()));
        assert!(!f.bounds.include_lower);
        assert!(f.bounds.include_upper);
        assert!(!f.bounds.is_unbounded());
        assert!(RangeFilter::default().bounds.is_unbounded());
    }
}
