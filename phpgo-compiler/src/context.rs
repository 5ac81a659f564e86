use crate::binder::FnId;

/// The lexical position of the walk: which function's scope and return
/// type are active.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Context {
    pub function: FnId,
}

impl Context {
    pub fn new(function: FnId) -> Self {
        Self { function }
    }
}

/// How the innermost expression handler should render a value read.
///
/// Passed by value down the emission recursion instead of being mutated and
/// restored on a shared context, so an early return can never leave a stale
/// flag behind.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RenderMode {
    /// The value is an assignment target; suppress the read accessor.
    pub in_assign: bool,
    /// The value is the receiver of a generated comparison method.
    pub in_compare: bool,
    /// The value feeds a logical operator; boxed reads coerce via `Bool()`.
    pub in_boolean: bool,
    /// The value is printed; boxed reads coerce via `String()`.
    pub in_print: bool,
    /// The value is the argument of an `is_*` intrinsic.
    pub in_is_kind_check: bool,
    /// The value is a control-statement condition.
    pub in_condition: bool,
}

impl RenderMode {
    pub fn with_assign(self) -> Self {
        Self {
            in_assign: true,
            ..self
        }
    }

    pub fn without_assign(self) -> Self {
        Self {
            in_assign: false,
            ..self
        }
    }

    pub fn with_compare(self) -> Self {
        Self {
            in_compare: true,
            ..self
        }
    }

    pub fn with_boolean(self) -> Self {
        Self {
            in_boolean: true,
            ..self
        }
    }

    pub fn with_print(self) -> Self {
        Self {
            in_print: true,
            ..self
        }
    }

    pub fn with_is_kind_check(self) -> Self {
        Self {
            in_is_kind_check: true,
            ..self
        }
    }

    pub fn with_condition(self) -> Self {
        Self {
            in_condition: true,
            ..self
        }
    }
}
