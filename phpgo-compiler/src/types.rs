use std::fmt;

/// The shared box type name used in generated Go whenever a value may hold
/// more than one primitive kind.
pub const BOX_TYPE_NAME: &str = "Var";

/// Closed set of primitive and composite kinds a PHP value can take on.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Kind {
    Int,
    Float,
    String,
    Bool,
    Null,
    Array(Box<Types>),
    Map(Box<Types>, Box<Types>),
}

impl Kind {
    /// The Go spelling of this kind in type position.
    pub fn go_name(&self) -> String {
        match self {
            Kind::Int => "int64".to_string(),
            Kind::Float => "float64".to_string(),
            Kind::String => "string".to_string(),
            Kind::Bool => "bool".to_string(),
            Kind::Null => "null".to_string(),
            Kind::Array(element) => format!("[]{}", element.go_name()),
            Kind::Map(key, value) => format!("map[{}]{}", key.go_name(), value.go_name()),
        }
    }

    /// Identifier-safe suffix used in generated tag constants and accessor
    /// names (`Constantint64`, `Getarray_int64`, ...).
    pub fn tag(&self) -> String {
        match self {
            Kind::Array(element) => format!("array_{}", element.tag()),
            Kind::Map(key, value) => format!("map_{}_{}", key.tag(), value.tag()),
            other => other.go_name(),
        }
    }

    pub fn is_numeric(&self) -> bool {
        matches!(self, Kind::Int | Kind::Float)
    }
}

/// An insertion-ordered, duplicate-free set of kinds an expression or
/// variable may hold at some point in the forward pass.
///
/// A `Types` with exactly one member is monomorphic and renders as a native
/// Go value; more than one member forces the boxed representation.
#[derive(Debug, Clone, Default)]
pub struct Types {
    kinds: Vec<Kind>,
}

impl Types {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn single(kind: Kind) -> Self {
        Self { kinds: vec![kind] }
    }

    pub fn of<I: IntoIterator<Item = Kind>>(kinds: I) -> Self {
        let mut types = Self::new();
        for kind in kinds {
            types.push(kind);
        }
        types
    }

    pub fn len(&self) -> usize {
        self.kinds.len()
    }

    pub fn is_empty(&self) -> bool {
        self.kinds.is_empty()
    }

    pub fn is_single(&self) -> bool {
        self.kinds.len() == 1
    }

    pub fn kinds(&self) -> &[Kind] {
        &self.kinds
    }

    pub fn first(&self) -> Option<&Kind> {
        self.kinds.first()
    }

    pub fn contains(&self, kind: &Kind) -> bool {
        self.kinds.contains(kind)
    }

    /// True when the set is exactly the given single kind.
    pub fn is(&self, kind: &Kind) -> bool {
        self.is_single() && self.kinds[0] == *kind
    }

    /// Insert a kind, preserving first-seen order.
    pub fn push(&mut self, kind: Kind) {
        if !self.kinds.contains(&kind) {
            self.kinds.push(kind);
        }
    }

    /// Union `other` into this set. Accumulation is monotone; kinds are
    /// never removed.
    pub fn merge(&mut self, other: &Types) {
        for kind in &other.kinds {
            self.push(kind.clone());
        }
    }

    pub fn contains_all(&self, other: &Types) -> bool {
        other.kinds.iter().all(|kind| self.kinds.contains(kind))
    }

    /// Identifier-safe tag suffix for this set, mirroring `go_name`.
    pub fn tag(&self) -> String {
        if self.is_single() {
            match &self.kinds[0] {
                Kind::Null => "int64".to_string(),
                kind => kind.tag(),
            }
        } else {
            BOX_TYPE_NAME.to_string()
        }
    }

    /// The Go type a value of this set renders as: the concrete type for a
    /// monomorphic set, the shared box type otherwise. A lone `null`
    /// occupies an `int64` slot in the output.
    pub fn go_name(&self) -> String {
        if self.is_single() {
            match &self.kinds[0] {
                Kind::Null => "int64".to_string(),
                kind => kind.go_name(),
            }
        } else {
            BOX_TYPE_NAME.to_string()
        }
    }
}

// Structural equality as a set: element order does not matter, so two
// accumulations that observed the same kinds in a different order compare
// equal.
impl PartialEq for Types {
    fn eq(&self, other: &Self) -> bool {
        self.kinds.len() == other.kinds.len()
            && self.kinds.iter().all(|kind| other.kinds.contains(kind))
    }
}

impl Eq for Types {}

impl fmt::Display for Types {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.kinds.is_empty() {
            return f.write_str("unknown");
        }
        let joined = self
            .kinds
            .iter()
            .map(Kind::go_name)
            .collect::<Vec<_>>()
            .join("|");
        f.write_str(&joined)
    }
}
