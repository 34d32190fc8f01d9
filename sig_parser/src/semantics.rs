use crate::errors::SemanticsError;
use sig_syntax::members::MixinKind;
use sig_syntax::types::Overload;
use sig_syntax::{Decl, Member, MethodKind, NameKind};

fn check_method_overloads(owner: &str, name: &str, overloads: &[Overload]) -> Vec<SemanticsError> {
    let super_count = overloads
        .iter()
        .filter(|o| matches!(o, Overload::Super))
        .count();
    if super_count > 1 {
        vec![SemanticsError::DuplicateSuperSentinel {
            name: format!("{owner}#{name}"),
        }]
    } else {
        Vec::new()
    }
}

fn check_interface_member(name: &str, member: &Member) -> Vec<SemanticsError> {
    match member {
        Member::Method(m) if m.kind != MethodKind::Instance => {
            vec![SemanticsError::InterfaceSelfMethod {
                name: name.to_string(),
            }]
        }
        Member::Method(m) => check_method_overloads(name, &m.name, &m.overloads),
        Member::Mixin(mx) if mx.kind != MixinKind::Include || mx.name.kind() != NameKind::Interface => {
            vec![SemanticsError::InterfaceNonInterfaceInclude {
                name: name.to_string(),
                included: mx.name.to_string(),
            }]
        }
        _ => Vec::new(),
    }
}

fn check_class_like_member(owner: &str, member: &Member) -> Vec<SemanticsError> {
    match member {
        Member::Method(m) => check_method_overloads(owner, &m.name, &m.overloads),
        Member::Nested(decl) => check_decl(decl),
        _ => Vec::new(),
    }
}

/// Structural checks beyond the grammar (spec §4.1: "SemanticsError
/// (well-formed syntactically but violates a structural rule such as
/// 'self. method in interface')"). Runs once per top-level declaration,
/// recursing into nested declarations.
pub fn check_decl(decl: &Decl) -> Vec<SemanticsError> {
    match decl {
        Decl::Interface(i) => i
            .members
            .iter()
            .flat_map(|m| check_interface_member(&i.name.to_string(), m))
            .collect(),
        Decl::Class(c) => c
            .members
            .iter()
            .flat_map(|m| check_class_like_member(&c.name.to_string(), m))
            .collect(),
        Decl::Module(m) => m
            .members
            .iter()
            .flat_map(|mem| check_class_like_member(&m.name.to_string(), mem))
            .collect(),
        Decl::Extension(e) => e
            .members
            .iter()
            .flat_map(|m| check_class_like_member(&e.name.to_string(), m))
            .collect(),
        Decl::Constant(_) | Decl::Global(_) | Decl::Alias(_) => Vec::new(),
    }
}

pub fn check_all(decls: &[Decl]) -> Vec<SemanticsError> {
    decls.iter().flat_map(check_decl).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::signature_file::parse_signature_text;

    #[test]
    fn rejects_self_method_in_interface() {
        let decls =
            parse_signature_text("interface _Foo def self.bar: -> void end").unwrap();
        let errors = check_all(&decls);
        assert_eq!(errors.len(), 1);
        assert!(matches!(errors[0], SemanticsError::InterfaceSelfMethod { .. }));
    }

    #[test]
    fn rejects_non_interface_include_in_interface() {
        let decls =
            parse_signature_text("interface _Foo include Bar end").unwrap();
        let errors = check_all(&decls);
        assert_eq!(errors.len(), 1);
        assert!(matches!(
            errors[0],
            SemanticsError::InterfaceNonInterfaceInclude { .. }
        ));
    }

    #[test]
    fn rejects_duplicate_super_sentinel() {
        let decls = parse_signature_text(
            "class C def f: -> void | super | super end",
        )
        .unwrap();
        let errors = check_all(&decls);
        assert_eq!(errors.len(), 1);
        assert!(matches!(
            errors[0],
            SemanticsError::DuplicateSuperSentinel { .. }
        ));
    }
}
