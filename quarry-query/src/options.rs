//! Closed option sets used by filters and queries.
//!
//! Each option carries its wire spelling; `as_str` and `FromStr` convert in
//! both directions and serde uses the same spelling.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::QueryError;

macro_rules! wire_enum {
    (
        $(#[$meta:meta])*
        $name:ident {
            $( $(#[$vmeta:meta])* $variant:ident => $wire:literal ),+ $(,)?
        }
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
        pub enum $name {
            $( $(#[$vmeta])* #[serde(rename = $wire)] $variant ),+
        }

        impl $name {
            /// Every option, in declaration order.
            pub const ALL: &'static [$name] = &[$($name::$variant),+];

            /// The wire spelling.
            pub fn as_str(&self) -> &'static str {
                match self {
                    $( Self::$variant => $wire ),+
                }
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(self.as_str())
            }
        }

        impl FromStr for $name {
            type Err = QueryError;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                match s {
                    $( $wire => Ok(Self::$variant), )+
                    other => Err(QueryError::invalid_filter(format!(
                        "`{}` is not a valid {}",
                        other,
                        stringify!($name)
                    ))),
                }
            }
        }
    };
}

wire_enum! {
    /// How a terms filter is executed by the engine.
    TermsExecution {
        Plain => "plain",
        Bool => "bool",
        And => "and",
        Or => "or",
        Fielddata => "fielddata",
    }
}

wire_enum! {
    /// How nested hits contribute to the parent score.
    NestedScore {
        Avg => "avg",
        Total => "total",
        Max => "max",
        None => "none",
    }
}

wire_enum! {
    /// Execution strategy for a bounding box filter.
    GeoExecution {
        Memory => "memory",
        Indexed => "indexed",
    }
}

wire_enum! {
    /// Bounding box pre-check used by distance filters.
    GeoOptimizeBBox {
        Memory => "memory",
        Indexed => "indexed",
        None => "none",
    }
}

wire_enum! {
    /// Distance units.
    GeoUnit {
        Miles => "mi",
        Yards => "yd",
        Feet => "ft",
        Inches => "in",
        Kilometers => "km",
        Meters => "m",
        Centimeters => "cm",
        Millimeters => "mm",
        NauticalMiles => "nmi",
    }
}

wire_enum! {
    /// Distance computation method.
    DistanceType {
        Arc => "arc",
        Plane => "plane",
        SloppyArc => "sloppy_arc",
    }
}

wire_enum! {
    /// Spatial relation for shape filters.
    GeoShapeRelation {
        Intersects => "intersects",
        Disjoint => "disjoint",
        Within => "within",
    }
}

wire_enum! {
    /// How the analyzed terms of a match query combine.
    MatchOperator {
        And => "and",
        Or => "or",
    }
}

wire_enum! {
    /// Script languages.
    ScriptLang {
        Mvel => "mvel",
        Js => "js",
        Groovy => "groovy",
        Python => "python",
        Native => "native",
        Expression => "expression",
    }
}
