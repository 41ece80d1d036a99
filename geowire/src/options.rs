//! Configuration of decode and encode calls.

use geowire_types::{Coordinate, Geometry, Reference};
use serde::{Deserialize, Serialize};

use crate::cursor::ByteOrder;
use crate::error::CodecError;

/// Explicitly supplied reference of the input coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum SourceReference {
    /// Already resolved reference.
    Reference(Reference),
    /// Numeric SRID, resolved the same way as an SRID embedded in the data.
    ///
    /// Unlike an embedded SRID, an explicit `0` is accepted and means [`Reference::Unspecified`].
    Srid(i32),
}

impl SourceReference {
    /// Resolves the value into a reference.
    pub fn resolve(self) -> Result<Reference, CodecError> {
        match self {
            SourceReference::Reference(reference) => Ok(reference),
            SourceReference::Srid(srid) => Reference::from_srid(srid)
                .ok_or_else(|| CodecError::UnknownReference(format!("SRID {srid}"))),
        }
    }
}

impl From<Reference> for SourceReference {
    fn from(value: Reference) -> Self {
        Self::Reference(value)
    }
}

impl From<i32> for SourceReference {
    fn from(value: i32) -> Self {
        Self::Srid(value)
    }
}

/// Options of the WKB and WKT decoders.
///
/// ```
/// use geowire::{DecodeOptions, Reference};
///
/// let options = DecodeOptions::new()
///     .with_source(4326)
///     .with_target(Reference::Projected)
///     .with_max_depth(8);
/// assert_eq!(options.max_depth, 8);
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DecodeOptions {
    /// Reference of the input coordinates. If not set, the SRID embedded in the data is used.
    pub source: Option<SourceReference>,
    /// Reference of the decoded coordinates.
    pub target: Reference,
    /// Maximum nesting depth of geometries. The top level geometry has depth `0`.
    pub max_depth: usize,
    /// Accept a WKB multipoint that ends cleanly before the declared number of points.
    pub tolerate_short_multipoint: bool,
    /// Fail with [`CodecError::EmptyGeometry`] if the decoded geometry has no coordinates.
    pub reject_empty: bool,
}

impl DecodeOptions {
    /// Default value of [`DecodeOptions::max_depth`].
    pub const DEFAULT_MAX_DEPTH: usize = 32;

    /// Creates default options: no explicit source, geographic target.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the explicit source reference.
    pub fn with_source(mut self, source: impl Into<SourceReference>) -> Self {
        self.source = Some(source.into());
        self
    }

    /// Sets the target reference.
    pub fn with_target(mut self, target: Reference) -> Self {
        self.target = target;
        self
    }

    /// Sets the maximum nesting depth.
    pub fn with_max_depth(mut self, max_depth: usize) -> Self {
        self.max_depth = max_depth;
        self
    }

    /// Sets whether short WKB multipoints are accepted.
    pub fn with_tolerate_short_multipoint(mut self, tolerate: bool) -> Self {
        self.tolerate_short_multipoint = tolerate;
        self
    }

    /// Sets whether empty geometries are rejected.
    pub fn with_reject_empty(mut self, reject: bool) -> Self {
        self.reject_empty = reject;
        self
    }
}

impl Default for DecodeOptions {
    fn default() -> Self {
        Self {
            source: None,
            target: Reference::Geographic,
            max_depth: Self::DEFAULT_MAX_DEPTH,
            tolerate_short_multipoint: false,
            reject_empty: false,
        }
    }
}

/// Options of the WKB and WKT encoders.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct EncodeOptions {
    /// Byte order of the binary output. Ignored by the text encoder.
    pub byte_order: ByteOrder,
    /// If set, coordinates are converted into this reference and its SRID is written with the top level
    /// geometry. [`Reference::Unspecified`] has no SRID on the wire, so none is written for it.
    pub target: Option<Reference>,
}

impl EncodeOptions {
    /// Creates default options: little endian, no reference.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the byte order.
    pub fn with_byte_order(mut self, byte_order: ByteOrder) -> Self {
        self.byte_order = byte_order;
        self
    }

    /// Sets the target reference.
    pub fn with_target(mut self, target: Reference) -> Self {
        self.target = Some(target);
        self
    }

    /// SRID to write with the top level geometry.
    pub(crate) fn srid(&self) -> Option<i32> {
        self.target
            .filter(|target| *target != Reference::Unspecified)
            .map(|target| target.srid())
    }
}

/// State shared by the recursive descent of a single decode call: the resolved source reference and the
/// limits from the options.
#[derive(Debug)]
pub(crate) struct DecodeContext<'a> {
    options: &'a DecodeOptions,
    source: Option<Reference>,
    explicit_source: bool,
}

impl<'a> DecodeContext<'a> {
    pub(crate) fn new(options: &'a DecodeOptions) -> Result<Self, CodecError> {
        let mut context = Self {
            options,
            source: None,
            explicit_source: false,
        };
        if let Some(source) = options.source {
            context.set_source(source.resolve()?)?;
            context.explicit_source = true;
        }

        Ok(context)
    }

    /// Uses an SRID found in the data, unless the source was supplied explicitly.
    ///
    /// An SRID of a nested geometry must name the same reference as the one already taken from the data.
    pub(crate) fn embedded_srid(&mut self, srid: i32) -> Result<(), CodecError> {
        if self.explicit_source {
            log::trace!("Ignoring embedded SRID {srid}, source reference is supplied explicitly");
            return Ok(());
        }

        if let Some(source) = self.source {
            return match Reference::from_srid(srid) {
                Some(reference) if reference == source => Ok(()),
                _ => Err(CodecError::DataCorrupted(format!(
                    "embedded SRID {srid} conflicts with {source} of the enclosing geometry"
                ))),
            };
        }

        match Reference::from_srid(srid) {
            Some(Reference::Unspecified) | None => Err(CodecError::UnknownReference(format!(
                "embedded SRID {srid}"
            ))),
            Some(reference) => self.set_source(reference),
        }
    }

    fn set_source(&mut self, source: Reference) -> Result<(), CodecError> {
        let target = self.options.target;
        if !source.can_convert_to(target) {
            return Err(CodecError::ReferenceMismatch {
                from: source,
                to: target,
            });
        }

        log::debug!("Decoding coordinates from {source} into {target}");
        self.source = Some(source);
        Ok(())
    }

    /// Fails if no source reference is known at this point.
    pub(crate) fn require_source(&self) -> Result<Reference, CodecError> {
        self.source.ok_or_else(|| {
            CodecError::UnknownReference(
                "no reference supplied and no SRID in the data".to_string(),
            )
        })
    }

    pub(crate) fn check_depth(&self, depth: usize) -> Result<(), CodecError> {
        if depth > self.options.max_depth {
            return Err(CodecError::DataCorrupted(format!(
                "geometry nesting exceeds the maximum depth of {}",
                self.options.max_depth
            )));
        }

        Ok(())
    }

    pub(crate) fn tolerate_short_multipoint(&self) -> bool {
        self.options.tolerate_short_multipoint
    }

    /// Builds a coordinate in the target reference. Non-finite `z` and `m` are treated as absent.
    ///
    /// The caller is responsible for rejecting non-finite `x` and `y`.
    pub(crate) fn coordinate(
        &self,
        x: f64,
        y: f64,
        z: Option<f64>,
        m: Option<f64>,
    ) -> Result<Coordinate, CodecError> {
        let source = self.require_source()?;
        let coordinate = Coordinate::new(x, y, source).with_zm(
            z.filter(|v| v.is_finite()),
            m.filter(|v| v.is_finite()),
        );

        Ok(coordinate.to_reference(self.options.target)?)
    }

    pub(crate) fn finish(&self, geometry: Geometry) -> Result<Geometry, CodecError> {
        if self.options.reject_empty && geometry.is_empty() {
            return Err(CodecError::EmptyGeometry);
        }

        Ok(geometry)
    }
}

/// Converts coordinates of a geometry being encoded into the requested reference.
pub(crate) fn encode_coordinate(
    coordinate: &Coordinate,
    target: Option<Reference>,
) -> Result<Coordinate, CodecError> {
    if !coordinate.is_finite() {
        return Err(CodecError::InvalidGeometry(format!(
            "coordinate ({}, {}) is not finite",
            coordinate.x(),
            coordinate.y()
        )));
    }

    match target {
        Some(target) => Ok(coordinate.to_reference(target)?),
        None => Ok(*coordinate),
    }
}
