//! Direct tests of the synthesized box-type declaration block.

use phpgo_compiler::types::{Kind, Types};
use phpgo_compiler::varinfo::VarInfo;

fn section<'a>(output: &'a str, start: &str) -> &'a str {
    let begin = output.find(start).unwrap_or_else(|| {
        panic!("missing `{start}` in:\n{output}");
    });
    let rest = &output[begin..];
    match rest[start.len()..].find("\nfunc ") {
        Some(end) => &rest[..start.len() + end],
        None => rest,
    }
}

#[test]
fn empty_observation_generates_nothing() {
    let info = VarInfo::new();
    assert!(!info.need_generate());
    assert_eq!(info.generate(), "");
}

#[test]
fn monomorphic_observations_generate_nothing() {
    let mut info = VarInfo::new();
    info.observe(&Types::single(Kind::Int));
    info.observe(&Types::single(Kind::String));
    assert!(!info.need_generate());
    assert_eq!(info.generate(), "");
}

#[test]
fn fixed_tags_always_lead_in_fixed_order() {
    let mut info = VarInfo::new();
    info.observe(&Types::of([Kind::String, Kind::Bool]));
    let output = info.generate();

    let tags = section(&output, "type ValueType");
    let int_at = tags.find("Constantint64").expect("int tag");
    let float_at = tags.find("Constantfloat64").expect("float tag");
    let string_at = tags.find("Constantstring").expect("string tag");
    let bool_at = tags.find("Constantbool").expect("bool tag");
    let null_at = tags.find("Constantnull").expect("null tag");
    assert!(int_at < float_at && float_at < string_at && string_at < bool_at);
    assert!(bool_at < null_at, "null is always last");
}

#[test]
fn bool_comparator_rejects_ordering() {
    let mut info = VarInfo::new();
    info.observe(&Types::of([Kind::Int, Kind::Bool]));
    let output = info.generate();

    let comparator = section(&output, "func (v *Var) CompareWithbool");
    assert!(comparator.contains("case Equal:\n\t\t\treturn v.Val.(bool) == val"));
    assert!(comparator.contains("case NotEqual:\n\t\t\treturn v.Val.(bool) != val"));
    assert!(comparator.contains("case Greater:\n\t\t\treturn false"));
    assert!(comparator.contains("case SmallerEqual:\n\t\t\treturn false"));
}

#[test]
fn mismatched_tags_compare_false() {
    let mut info = VarInfo::new();
    info.observe(&Types::of([Kind::Int, Kind::String]));
    let output = info.generate();

    let comparator = section(&output, "func (v *Var) CompareWithint64");
    assert!(comparator.contains("case Constantstring:\n\t\treturn false"));
    assert!(comparator.contains("case Equal:\n\t\t\treturn v.Val.(int64) == val"));
}

#[test]
fn null_family_appears_once() {
    let mut info = VarInfo::new();
    info.observe(&Types::of([Kind::Int, Kind::Null]));
    info.observe(&Types::of([Kind::String, Kind::Null]));
    let output = info.generate();

    assert_eq!(output.matches("func (v *Var) CompareWithnull").count(), 1);
    assert!(output.contains("func (v *Var) Getnull() int64"));
    assert!(output.contains("func (v *Var) Setnull(val int64)"));
    assert!(output.contains("case Constantnull:\n\t\treturn \"null\""));
}

#[test]
fn without_null_the_null_family_is_absent() {
    let mut info = VarInfo::new();
    info.observe(&Types::of([Kind::Int, Kind::String]));
    let output = info.generate();

    assert!(!output.contains("CompareWithnull"));
    assert!(!output.contains("Setnull"));
    // The predicate family still carries Isnull; a boxed value can be
    // asked about any kind.
    assert!(output.contains("func Isnull(val Var) bool"));
}

#[test]
fn observed_array_kinds_drive_isarray() {
    let mut info = VarInfo::new();
    let int_array = Kind::Array(Box::new(Types::single(Kind::Int)));
    info.observe(&Types::of([int_array, Kind::String]));
    let output = info.generate();

    let predicate = section(&output, "func Isarray(val Var) bool");
    assert!(predicate.contains("case Constantarray_int64:\n\t\treturn true"));

    let simple = section(&output, "func IsarraySimple(val interface{}) bool");
    assert!(simple.contains("case []int64:\n\t\treturn true"));
}

#[test]
fn without_arrays_isarray_is_constant_false() {
    let mut info = VarInfo::new();
    info.observe(&Types::of([Kind::Int, Kind::String]));
    let output = info.generate();

    let predicate = section(&output, "func Isarray(val Var) bool");
    assert!(predicate.contains("return false"));
    assert!(!predicate.contains("switch"));
}

#[test]
fn output_is_independent_of_observation_order() {
    let mut forward = VarInfo::new();
    forward.observe(&Types::of([Kind::Int, Kind::String]));
    forward.observe(&Types::of([Kind::Float, Kind::Bool]));

    let mut reversed = VarInfo::new();
    reversed.observe(&Types::of([Kind::Bool, Kind::Float]));
    reversed.observe(&Types::of([Kind::String, Kind::Int]));

    assert_eq!(forward.generate(), reversed.generate());
}

#[test]
fn accessor_pairs_cover_every_field() {
    let mut info = VarInfo::new();
    info.observe(&Types::of([Kind::Int, Kind::Float]));
    let output = info.generate();

    for tag in ["int64", "float64", "string", "bool"] {
        assert!(output.contains(&format!("func (v *Var) Get{tag}()")));
        assert!(output.contains(&format!("func (v *Var) Set{tag}(")));
    }
}
