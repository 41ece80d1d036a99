/// Conversion between two point types expressed in different coordinate systems.
///
/// `project` converts `InPoint` into `OutPoint`, `unproject` does the reverse. Both return `None` if the
/// point cannot be represented in the output system.
pub trait Projection {
    /// Input point type.
    type InPoint;
    /// Output point type.
    type OutPoint;

    /// Projects the point.
    fn project(&self, input: &Self::InPoint) -> Option<Self::OutPoint>;
    /// Reverses the projection.
    fn unproject(&self, input: &Self::OutPoint) -> Option<Self::InPoint>;
}
