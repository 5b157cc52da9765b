//! Samplers (`<sampler>`) and their semantic-tagged inputs.
//!
//! A sampler is an ordered list of inputs, each binding a semantic role to a
//! source visible in the enclosing scope. Role accessors return the first
//! input with that role, or `None`; loading never checks which roles exist.

use std::fmt;
use std::str::FromStr;
use std::sync::Arc;

use dae_document_core::DocNode;
use hashbrown::HashMap;

use crate::error::LoadError;
use crate::scope::Scope;
use crate::source::ValueSource;

/// Semantic role of a sampler input.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub enum Semantic {
    /// Domain of the curve, usually time.
    Input,
    /// Curve values.
    Output,
    /// Per-segment curve shape.
    Interpolation,
    InTangent,
    OutTangent,
    /// Any other semantic found in the document.
    Other(String),
}

impl Semantic {
    pub fn parse(s: &str) -> Self {
        match s {
            "INPUT" => Semantic::Input,
            "OUTPUT" => Semantic::Output,
            "INTERPOLATION" => Semantic::Interpolation,
            "IN_TANGENT" => Semantic::InTangent,
            "OUT_TANGENT" => Semantic::OutTangent,
            other => Semantic::Other(other.to_string()),
        }
    }

    pub fn as_str(&self) -> &str {
        match self {
            Semantic::Input => "INPUT",
            Semantic::Output => "OUTPUT",
            Semantic::Interpolation => "INTERPOLATION",
            Semantic::InTangent => "IN_TANGENT",
            Semantic::OutTangent => "OUT_TANGENT",
            Semantic::Other(s) => s,
        }
    }
}

impl fmt::Display for Semantic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Interpolation methods named in an INTERPOLATION source.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum InterpolationKind {
    Linear,
    Bezier,
    Cardinal,
    Hermite,
    BSpline,
    Step,
}

impl InterpolationKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            InterpolationKind::Linear => "LINEAR",
            InterpolationKind::Bezier => "BEZIER",
            InterpolationKind::Cardinal => "CARDINAL",
            InterpolationKind::Hermite => "HERMITE",
            InterpolationKind::BSpline => "BSPLINE",
            InterpolationKind::Step => "STEP",
        }
    }
}

impl FromStr for InterpolationKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(match s {
            "LINEAR" => InterpolationKind::Linear,
            "BEZIER" => InterpolationKind::Bezier,
            "CARDINAL" => InterpolationKind::Cardinal,
            "HERMITE" => InterpolationKind::Hermite,
            "BSPLINE" => InterpolationKind::BSpline,
            "STEP" => InterpolationKind::Step,
            other => return Err(format!("unknown interpolation '{other}'")),
        })
    }
}

impl fmt::Display for InterpolationKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Clone, Debug)]
pub struct Input {
    semantic: Semantic,
    source: Arc<ValueSource>,
}

impl Input {
    pub fn new(semantic: Semantic, source: Arc<ValueSource>) -> Self {
        Self { semantic, source }
    }

    pub fn semantic(&self) -> &Semantic {
        &self.semantic
    }

    /// The scope's source itself (shared, not copied).
    pub fn source(&self) -> &Arc<ValueSource> {
        &self.source
    }
}

#[derive(Clone, Debug)]
pub struct Sampler {
    id: Option<String>,
    inputs: Vec<Input>,
}

impl Sampler {
    pub fn new(id: Option<String>, inputs: Vec<Input>) -> Self {
        Self { id, inputs }
    }

    pub fn id(&self) -> Option<&str> {
        self.id.as_deref()
    }

    pub fn inputs(&self) -> &[Input] {
        &self.inputs
    }

    /// First input with the given semantic.
    pub fn by_semantic(&self, semantic: &Semantic) -> Option<&Input> {
        self.inputs.iter().find(|input| input.semantic == *semantic)
    }

    pub fn input(&self) -> Option<&Input> {
        self.by_semantic(&Semantic::Input)
    }

    pub fn output(&self) -> Option<&Input> {
        self.by_semantic(&Semantic::Output)
    }

    pub fn interpolation(&self) -> Option<&Input> {
        self.by_semantic(&Semantic::Interpolation)
    }

    pub fn in_tangent(&self) -> Option<&Input> {
        self.by_semantic(&Semantic::InTangent)
    }

    pub fn out_tangent(&self) -> Option<&Input> {
        self.by_semantic(&Semantic::OutTangent)
    }

    /// Like [`Sampler::by_semantic`], but a missing role is an error.
    pub fn require(&self, semantic: Semantic) -> Result<&Input, LoadError> {
        match self.by_semantic(&semantic) {
            Some(input) => Ok(input),
            None => Err(LoadError::RoleNotFound {
                sampler: self.id.clone().unwrap_or_default(),
                semantic,
            }),
        }
    }

    /// True when both an INPUT and an OUTPUT are present.
    pub fn is_complete(&self) -> bool {
        self.input().is_some() && self.output().is_some()
    }

    /// Decode the INTERPOLATION source into per-segment methods.
    pub fn interpolation_kinds(&self) -> Result<Vec<InterpolationKind>, LoadError> {
        let input = self.require(Semantic::Interpolation)?;
        let names = input.source().data().as_names().ok_or_else(|| {
            LoadError::malformed(
                "source",
                format!("interpolation source '{}' is not a Name_array", input.source().id()),
            )
        })?;
        names
            .iter()
            .map(|name| {
                name.parse::<InterpolationKind>()
                    .map_err(|reason| LoadError::malformed("Name_array", reason))
            })
            .collect()
    }
}

impl fmt::Display for Sampler {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "<Sampler id={}>", self.id.as_deref().unwrap_or_default())
    }
}

/// Samplers of one animation, in document order, addressable by id.
///
/// Inserting an id that is already present replaces the earlier sampler in
/// place. Samplers without an id are always appended.
#[derive(Debug, Default)]
pub struct SamplerTable {
    ordered: Vec<Arc<Sampler>>,
    by_id: HashMap<String, usize>,
}

impl SamplerTable {
    pub fn insert(&mut self, sampler: Sampler) {
        let sampler = Arc::new(sampler);
        let Some(id) = sampler.id() else {
            self.ordered.push(sampler);
            return;
        };
        match self.by_id.get(id).copied() {
            Some(slot) => self.ordered[slot] = sampler,
            None => {
                self.by_id.insert(id.to_owned(), self.ordered.len());
                self.ordered.push(sampler);
            }
        }
    }

    pub fn get(&self, id: &str) -> Option<&Arc<Sampler>> {
        self.by_id.get(id).map(|&slot| &self.ordered[slot])
    }

    pub fn len(&self) -> usize {
        self.ordered.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ordered.is_empty()
    }

    pub fn into_vec(self) -> Vec<Arc<Sampler>> {
        self.ordered
    }
}

/// Resolve one `<input semantic=".." source="#..">` against `scope`.
pub fn load_input<N: DocNode>(node: &N, scope: &Scope) -> Result<Input, LoadError> {
    let semantic = node
        .attr_nonempty("semantic")
        .ok_or_else(|| LoadError::missing("input", "semantic"))?;
    let reference = node
        .attr_nonempty("source")
        .ok_or_else(|| LoadError::missing("input", "source"))?;
    let source = scope.resolve(reference)?;
    Ok(Input::new(Semantic::parse(semantic), Arc::clone(source)))
}

/// Load a `<sampler>`; the first failing input fails the whole sampler.
pub fn load_sampler<N: DocNode>(node: &N, scope: &Scope) -> Result<Sampler, LoadError> {
    let id = node.attr("id").map(str::to_owned);
    let inputs = node
        .find_all("input")
        .map(|input| load_input(input, scope))
        .collect::<Result<Vec<_>, _>>()?;
    Ok(Sampler::new(id, inputs))
}
