use crate::errors::PResult;
use crate::lexer::annotation::annotation;
use crate::lexer::identifiers::{global_name, plain_identifier, type_name, type_variable};
use crate::lexer::sym;
use crate::members::{interface_member, member};
use crate::span::{spanning, Span};
use crate::types::type_expr;
use nom::Parser;
use nom::branch::alt;
use nom::combinator::opt;
use nom::multi::{many0, separated_list0, separated_list1};
use nom::sequence::delimited;
use sig_syntax::{
    AliasDecl, ClassDecl, ConstantDecl, Decl, ExtensionDecl, GlobalDecl, InterfaceDecl, ModuleDecl,
};

fn type_params(input: Span<'_>) -> PResult<'_, Vec<String>> {
    let (input, params) = opt(delimited(
        sym("["),
        separated_list1(sym(","), type_variable),
        sym("]"),
    ))
    .parse(input)?;
    Ok((input, params.unwrap_or_default()))
}

fn type_args(input: Span<'_>) -> PResult<'_, Vec<sig_syntax::Type>> {
    let (input, args) = opt(delimited(
        sym("["),
        separated_list0(sym(","), type_expr),
        sym("]"),
    ))
    .parse(input)?;
    Ok((input, args.unwrap_or_default()))
}

/// `class Name[TypeParams]? (< Super[args])? members end` (spec §4.1).
pub fn class_decl(input: Span<'_>) -> PResult<'_, Decl> {
    let start = input;
    let (input, _) = sym("class")(input)?;
    let (input, name) = type_name(input)?;
    let (input, type_params) = type_params(input)?;
    let (input, super_class) = opt(|input| {
        let (input, _) = sym("<")(input)?;
        let (input, super_name) = type_name(input)?;
        let (input, args) = type_args(input)?;
        Ok((input, (super_name, args)))
    })
    .parse(input)?;
    let (input, members) = many0(member).parse(input)?;
    let (input, _) = sym("end")(input)?;
    let location = spanning(start, input);
    Ok((
        input,
        Decl::Class(ClassDecl {
            name,
            type_params,
            super_class,
            members,
            annotations: Vec::new(),
            location,
        }),
    ))
}

/// `module Name[TypeParams]? (: SelfType (, SelfType)*)? members end`
/// (spec §4.1).
pub fn module_decl(input: Span<'_>) -> PResult<'_, Decl> {
    let start = input;
    let (input, _) = sym("module")(input)?;
    let (input, name) = type_name(input)?;
    let (input, type_params) = type_params(input)?;
    let (input, self_types) = opt(|input| {
        let (input, _) = sym(":")(input)?;
        separated_list1(sym(","), type_expr).parse(input)
    })
    .parse(input)?;
    let (input, members) = many0(member).parse(input)?;
    let (input, _) = sym("end")(input)?;
    let location = spanning(start, input);
    Ok((
        input,
        Decl::Module(ModuleDecl {
            name,
            type_params,
            self_types: self_types.unwrap_or_default(),
            members,
            annotations: Vec::new(),
            location,
        }),
    ))
}

/// `interface _Name[TypeParams]? members end`; body restricted to method
/// defs and interface includes (spec §4.1).
pub fn interface_decl(input: Span<'_>) -> PResult<'_, Decl> {
    let start = input;
    let (input, _) = sym("interface")(input)?;
    let (input, name) = type_name(input)?;
    let (input, type_params) = type_params(input)?;
    let (input, members) = many0(interface_member).parse(input)?;
    let (input, _) = sym("end")(input)?;
    let location = spanning(start, input);
    Ok((
        input,
        Decl::Interface(InterfaceDecl {
            name,
            type_params,
            members,
            annotations: Vec::new(),
            location,
        }),
    ))
}

/// `extension Name[TypeParams]? (ExtensionTag) members end` (spec §4.1).
pub fn extension_decl(input: Span<'_>) -> PResult<'_, Decl> {
    let start = input;
    let (input, _) = sym("extension")(input)?;
    let (input, name) = type_name(input)?;
    let (input, type_params) = type_params(input)?;
    let (input, extension_name) =
        delimited(sym("("), plain_identifier, sym(")")).parse(input)?;
    let (input, members) = many0(member).parse(input)?;
    let (input, _) = sym("end")(input)?;
    let location = spanning(start, input);
    Ok((
        input,
        Decl::Extension(ExtensionDecl {
            name,
            extension_name,
            type_params,
            members,
            annotations: Vec::new(),
            location,
        }),
    ))
}

/// `type name = type` (spec §4.1).
pub fn alias_decl(input: Span<'_>) -> PResult<'_, Decl> {
    let start = input;
    let (input, _) = sym("type")(input)?;
    let (input, name) = type_name(input)?;
    let (input, _) = sym("=")(input)?;
    let (input, ty) = type_expr(input)?;
    let location = spanning(start, input);
    Ok((input, Decl::Alias(AliasDecl { name, ty, location })))
}

/// `NAME: type`, where NAME may be absolute (spec §8 scenario 2: `::BAR:
/// any`).
pub fn constant_decl(input: Span<'_>) -> PResult<'_, Decl> {
    let start = input;
    let (input, name) = type_name(input)?;
    let (input, _) = sym(":")(input)?;
    let (input, ty) = type_expr(input)?;
    let location = spanning(start, input);
    Ok((input, Decl::Constant(ConstantDecl { name, ty, location })))
}

/// `$name: type` (spec §3 Data Model, "Global").
pub fn global_decl(input: Span<'_>) -> PResult<'_, Decl> {
    let start = input;
    let (input, name) = global_name(input)?;
    let (input, _) = sym(":")(input)?;
    let (input, ty) = type_expr(input)?;
    let location = spanning(start, input);
    Ok((input, Decl::Global(GlobalDecl { name, ty, location })))
}

/// A class/module/interface/constant declaration nested directly inside
/// a class or module body (spec §4.5: "Nested class/module declarations
/// inside a class produce constant entries").
pub fn nested_decl(input: Span<'_>) -> PResult<'_, Decl> {
    alt((class_decl, module_decl, interface_decl, constant_decl)).parse(input)
}

/// Attach annotations parsed ahead of a top-level declaration to the
/// variants that carry an `annotations` field (spec §4.1: "Optional
/// annotations precede any declaration or member"); `Alias`/`Constant`/
/// `Global` have no such field and drop them, same as member-level
/// annotations on variants without one.
pub(crate) fn attach_annotations(annotations: Vec<sig_syntax::Annotation>, decl: Decl) -> Decl {
    match decl {
        Decl::Class(mut d) => {
            d.annotations = annotations;
            Decl::Class(d)
        }
        Decl::Module(mut d) => {
            d.annotations = annotations;
            Decl::Module(d)
        }
        Decl::Interface(mut d) => {
            d.annotations = annotations;
            Decl::Interface(d)
        }
        Decl::Extension(mut d) => {
            d.annotations = annotations;
            Decl::Extension(d)
        }
        other => other,
    }
}

/// A single top-level declaration (spec §3 Data Model).
pub fn top_level_decl(input: Span<'_>) -> PResult<'_, Decl> {
    let (input, annotations) = many0(annotation).parse(input)?;
    let (input, decl) = alt((
        class_decl,
        module_decl,
        interface_decl,
        extension_decl,
        alias_decl,
        global_decl,
        constant_decl,
    ))
    .parse(input)?;
    Ok((input, attach_annotations(annotations, decl)))
}
