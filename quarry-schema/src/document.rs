//! Binding between Rust domain types and schema models.

/// A Rust type that is indexed as documents of a schema model.
///
/// The model name selects the schema context field expressions are resolved
/// against.
///
/// ```rust
/// use quarry_schema::Document;
///
/// struct Person;
///
/// impl Document for Person {
///     const MODEL: &'static str = "Person";
/// }
///
/// assert_eq!(Person::MODEL, "Person");
/// ```
pub trait Document {
    /// Name of the schema model describing this type.
    const MODEL: &'static str;
}
