//! Whole-unit aggregation of observed kinds and synthesis of the shared
//! boxed value type.
//!
//! Every `Types` that crosses a polymorphic position (variable merge, array
//! element, return type) is observed here. At finalization, one `Var`
//! declaration block is synthesized for the whole unit: tag constants, the
//! box struct, boolean/string coercions, the full per-tag comparison
//! matrix, getter/setter pairs, and the is-kind predicate families.
//! Synthesis is a pure function of the observed set, so output is
//! deterministic no matter the traversal order that fed it.

use std::collections::BTreeMap;
use std::fmt::Write;

use crate::types::{Kind, Types};

/// Tags always present in the generated block, in this order, regardless
/// of what the unit actually observed. Each carries the Go type behind it.
const FIXED_TAGS: &[(&str, &str)] = &[
    ("int64", "int64"),
    ("float64", "float64"),
    ("string", "string"),
    ("bool", "bool"),
];

/// The six comparison kinds and the Go operator each maps to.
const COMPARE_KINDS: &[(&str, &str)] = &[
    ("Equal", "=="),
    ("NotEqual", "!="),
    ("Greater", ">"),
    ("GreaterEqual", ">="),
    ("Smaller", "<"),
    ("SmallerEqual", "<="),
];

#[derive(Debug, Clone, Default)]
pub struct VarInfo {
    /// Observed tag -> Go type, beyond the fixed set. Ordered for
    /// deterministic synthesis.
    observed: BTreeMap<String, String>,
    saw_null: bool,
    need_generate: bool,
}

impl VarInfo {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn need_generate(&self) -> bool {
        self.need_generate
    }

    /// Force synthesis even without a polymorphic observation. Empty array
    /// literals and is-kind predicate calls reference the block directly.
    pub fn require_box(&mut self) {
        self.need_generate = true;
    }

    /// Register every kind of `types`; a set with more than one member
    /// marks the unit as needing the box type.
    pub fn observe(&mut self, types: &Types) {
        if types.len() > 1 {
            self.need_generate = true;
        }
        for kind in types.kinds() {
            self.observe_kind(kind);
        }
    }

    fn observe_kind(&mut self, kind: &Kind) {
        if matches!(kind, Kind::Null) {
            self.saw_null = true;
            return;
        }
        self.observed.insert(kind.tag(), kind.go_name());
    }

    /// All tags that participate in synthesis: the fixed set first, then
    /// the remaining observed tags in sorted order. `null` is kept out and
    /// handled by its dedicated accessor/comparator family.
    fn fields(&self) -> Vec<(String, String)> {
        let mut fields: Vec<(String, String)> = FIXED_TAGS
            .iter()
            .map(|(tag, go)| (tag.to_string(), go.to_string()))
            .collect();
        for (tag, go) in &self.observed {
            if !fields.iter().any(|(existing, _)| existing == tag) {
                fields.push((tag.clone(), go.clone()));
            }
        }
        fields
    }

    fn array_fields(&self) -> Vec<(String, String)> {
        self.observed
            .iter()
            .filter(|(tag, _)| tag.starts_with("array_"))
            .map(|(tag, go)| (tag.clone(), go.clone()))
            .collect()
    }

    /// Synthesize the complete box-type declaration block, or an empty
    /// string when no polymorphic value was ever observed.
    pub fn generate(&self) -> String {
        if !self.need_generate {
            return String::new();
        }

        let fields = self.fields();
        let mut out = String::new();

        self.generate_tags(&mut out, &fields);
        self.generate_struct(&mut out);
        self.generate_bool(&mut out, &fields);
        self.generate_string(&mut out, &fields);
        self.generate_compare_kinds(&mut out);
        self.generate_comparators(&mut out, &fields);
        self.generate_accessors(&mut out, &fields);
        self.generate_is_kind(&mut out);

        out
    }

    fn generate_tags(&self, out: &mut String, fields: &[(String, String)]) {
        out.push_str("type ValueType uint8\n\nconst (\n");
        for (index, (tag, _)) in fields.iter().enumerate() {
            if index == 0 {
                let _ = writeln!(out, "\tConstant{tag} ValueType = iota");
            } else {
                let _ = writeln!(out, "\tConstant{tag}");
            }
        }
        out.push_str("\tConstantnull\n)\n\n");
    }

    fn generate_struct(&self, out: &mut String) {
        out.push_str(
            "type Var struct {\n\tVal  interface{}\n\tType ValueType\n}\n\nfunc NewVar() Var {\n\treturn Var{}\n}\n\n",
        );
    }

    fn generate_bool(&self, out: &mut String, fields: &[(String, String)]) {
        out.push_str("func (v *Var) Bool() bool {\n\tswitch v.Type {\n");
        for (tag, go) in fields {
            let body = match go.as_str() {
                "int64" => "return v.Val.(int64) != 0".to_string(),
                "float64" => "return v.Val.(float64) != 0".to_string(),
                "string" => "return v.Val.(string) != \"\"".to_string(),
                "bool" => "return v.Val.(bool)".to_string(),
                // No native truthiness rule: conservative false.
                _ => "return false".to_string(),
            };
            let _ = writeln!(out, "\tcase Constant{tag}:\n\t\t{body}");
        }
        out.push_str("\t}\n\n\treturn false\n}\n\n");
    }

    fn generate_string(&self, out: &mut String, fields: &[(String, String)]) {
        out.push_str("func (v *Var) String() string {\n\tswitch v.Type {\n");
        for (tag, go) in fields {
            let body = match go.as_str() {
                "string" => "return v.Val.(string)".to_string(),
                "int64" | "float64" | "bool" => {
                    format!("return fmt.Sprint(v.Val.({go}))")
                }
                _ => "return \"\"".to_string(),
            };
            let _ = writeln!(out, "\tcase Constant{tag}:\n\t\t{body}");
        }
        if self.saw_null {
            out.push_str("\tcase Constantnull:\n\t\treturn \"null\"\n");
        }
        out.push_str("\t}\n\n\treturn \"\"\n}\n\n");
    }

    fn generate_compare_kinds(&self, out: &mut String) {
        out.push_str("type CompareType uint8\n\nconst (\n");
        for (index, (kind, _)) in COMPARE_KINDS.iter().enumerate() {
            if index == 0 {
                let _ = writeln!(out, "\t{kind} CompareType = iota");
            } else {
                let _ = writeln!(out, "\t{kind}");
            }
        }
        out.push_str(")\n\n");
    }

    fn generate_comparators(&self, out: &mut String, fields: &[(String, String)]) {
        for (owner_tag, owner_go) in fields {
            let _ = writeln!(
                out,
                "func (v *Var) CompareWith{owner_tag}(val {owner_go}, compare CompareType) bool {{\n\tswitch v.Type {{"
            );
            for (tag, go) in fields {
                if tag != owner_tag {
                    // Mismatched tags never compare equal or ordered.
                    let _ = writeln!(out, "\tcase Constant{tag}:\n\t\treturn false");
                    continue;
                }
                match go.as_str() {
                    "int64" | "float64" | "string" => {
                        let _ = writeln!(out, "\tcase Constant{tag}:\n\t\tswitch compare {{");
                        for (kind, op) in COMPARE_KINDS {
                            let _ = writeln!(
                                out,
                                "\t\tcase {kind}:\n\t\t\treturn v.Val.({go}) {op} val"
                            );
                        }
                        out.push_str("\t\t}\n");
                    }
                    "bool" => {
                        // Booleans only support equality; the ordered
                        // family is hard-coded false.
                        let _ = writeln!(out, "\tcase Constant{tag}:\n\t\tswitch compare {{");
                        for (kind, _) in COMPARE_KINDS {
                            let body = match *kind {
                                "Equal" => "return v.Val.(bool) == val",
                                "NotEqual" => "return v.Val.(bool) != val",
                                _ => "return false",
                            };
                            let _ = writeln!(out, "\t\tcase {kind}:\n\t\t\t{body}");
                        }
                        out.push_str("\t\t}\n");
                    }
                    _ => {
                        let _ = writeln!(out, "\tcase Constant{tag}:\n\t\treturn false");
                    }
                }
            }
            out.push_str("\t}\n\n\treturn false\n}\n\n");
        }

        if self.saw_null {
            out.push_str(
                "func (v *Var) CompareWithnull(val int64, compare CompareType) bool {\n\tswitch compare {\n\tcase Equal:\n\t\treturn v.Type == Constantnull\n\tcase NotEqual:\n\t\treturn v.Type != Constantnull\n\tcase Greater:\n\t\treturn false\n\tcase GreaterEqual:\n\t\treturn v.Type == Constantnull\n\tcase Smaller:\n\t\treturn false\n\tcase SmallerEqual:\n\t\treturn v.Type == Constantnull\n\t}\n\n\treturn false\n}\n\n",
            );
        }
    }

    fn generate_accessors(&self, out: &mut String, fields: &[(String, String)]) {
        for (tag, go) in fields {
            let _ = writeln!(
                out,
                "func (v *Var) Get{tag}() {go} {{\n\treturn v.Val.({go})\n}}\n"
            );
        }
        for (tag, go) in fields {
            let _ = writeln!(
                out,
                "func (v *Var) Set{tag}(val {go}) {{\n\tv.Val = val\n\tv.Type = Constant{tag}\n}}\n"
            );
        }
        if self.saw_null {
            out.push_str(
                "func (v *Var) Getnull() int64 {\n\treturn v.Val.(int64)\n}\n\nfunc (v *Var) Setnull(val int64) {\n\tv.Val = int64(0)\n\tv.Type = Constantnull\n}\n\n",
            );
        }
    }

    fn generate_is_kind(&self, out: &mut String) {
        for (tag, _) in FIXED_TAGS {
            let _ = writeln!(
                out,
                "func Is{tag}(val Var) bool {{\n\treturn val.Type == Constant{tag}\n}}\n"
            );
        }
        out.push_str("func Isnull(val Var) bool {\n\treturn val.Type == Constantnull\n}\n\n");

        let arrays = self.array_fields();
        out.push_str("func Isarray(val Var) bool {\n");
        if arrays.is_empty() {
            out.push_str("\treturn false\n}\n\n");
        } else {
            out.push_str("\tswitch val.Type {\n");
            for (tag, _) in &arrays {
                let _ = writeln!(out, "\tcase Constant{tag}:\n\t\treturn true");
            }
            out.push_str("\t}\n\n\treturn false\n}\n\n");
        }

        for (tag, go) in FIXED_TAGS {
            let _ = writeln!(
                out,
                "func Is{tag}Simple(val interface{{}}) bool {{\n\t_, ok := val.({go})\n\treturn ok\n}}\n"
            );
        }
        out.push_str("func IsarraySimple(val interface{}) bool {\n");
        if arrays.is_empty() {
            out.push_str("\treturn false\n}\n\n");
        } else {
            out.push_str("\tswitch val.(type) {\n");
            for (_, go) in &arrays {
                let _ = writeln!(out, "\tcase {go}:\n\t\treturn true");
            }
            out.push_str("\t}\n\n\treturn false\n}\n\n");
        }
    }
}
