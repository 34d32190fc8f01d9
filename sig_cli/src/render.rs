//! A minimal, human-readable rendering of types and method signatures for
//! CLI output. This is deliberately not the writer spec §1 places out of
//! scope (round-trippable, annotation-preserving AST serialization) — just
//! enough text that `ancestors`/`methods`/`method`/`constant` output reads
//! like the signature language a user wrote, for a terminal rather than a
//! file.

use sig_syntax::types::{BlockSpec, LiteralValue};
use sig_syntax::{FunctionType, MethodType, Overload, Param, Type};

pub fn render_type(ty: &Type) -> String {
    match ty {
        Type::Any => "any".to_string(),
        Type::Void => "void".to_string(),
        Type::Bool => "bool".to_string(),
        Type::SelfType => "self".to_string(),
        Type::Instance => "instance".to_string(),
        Type::Class => "class".to_string(),
        Type::Nil => "nil".to_string(),
        Type::Top => "top".to_string(),
        Type::Bot => "bot".to_string(),
        Type::Literal(LiteralValue::String(s)) => format!("{s:?}"),
        Type::Literal(LiteralValue::Symbol(s)) => format!(":{s}"),
        Type::Literal(LiteralValue::Integer(i)) => i.to_string(),
        Type::Literal(LiteralValue::Bool(b)) => b.to_string(),
        Type::Variable(name) => name.clone(),
        Type::ClassInstance(name, args) => render_applied(&name.to_string(), args),
        Type::ClassSingleton(name) => format!("singleton({name})"),
        Type::Interface(name, args) => render_applied(&name.to_string(), args),
        Type::Alias(name) => name.to_string(),
        Type::Union(ts) => ts.iter().map(render_type).collect::<Vec<_>>().join(" | "),
        Type::Intersection(ts) => ts.iter().map(render_type).collect::<Vec<_>>().join(" & "),
        Type::Optional(t) => format!("{}?", render_type_parenthesized(t)),
        Type::Tuple(ts) => format!(
            "[{}]",
            ts.iter().map(render_type).collect::<Vec<_>>().join(", ")
        ),
        Type::Record(fields) => format!(
            "{{ {} }}",
            fields
                .iter()
                .map(|(name, t)| format!("{name}: {}", render_type(t)))
                .collect::<Vec<_>>()
                .join(", ")
        ),
        Type::Proc(ft) => format!("^{}", render_function_type(ft)),
    }
}

fn render_type_parenthesized(ty: &Type) -> String {
    match ty {
        Type::Union(_) | Type::Intersection(_) => format!("({})", render_type(ty)),
        other => render_type(other),
    }
}

fn render_applied(name: &str, args: &[Type]) -> String {
    if args.is_empty() {
        name.to_string()
    } else {
        format!(
            "{name}[{}]",
            args.iter().map(render_type).collect::<Vec<_>>().join(", ")
        )
    }
}

fn render_param(p: &Param) -> String {
    match &p.name {
        Some(name) => format!("{} {name}", render_type(&p.ty)),
        None => render_type(&p.ty),
    }
}

pub fn render_function_type(ft: &FunctionType) -> String {
    let mut parts = Vec::new();
    for p in &ft.required_positionals {
        parts.push(render_param(p));
    }
    for p in &ft.optional_positionals {
        parts.push(format!("?{}", render_param(p)));
    }
    if let Some(p) = &ft.rest_positional {
        parts.push(format!("*{}", render_param(p)));
    }
    for p in &ft.trailing_positionals {
        parts.push(render_param(p));
    }
    let mut keywords: Vec<_> = ft.required_keywords.iter().collect();
    keywords.sort_by_key(|(name, _)| name.to_string());
    for (name, p) in keywords {
        parts.push(format!("{name}: {}", render_type(&p.ty)));
    }
    let mut optional_keywords: Vec<_> = ft.optional_keywords.iter().collect();
    optional_keywords.sort_by_key(|(name, _)| name.to_string());
    for (name, p) in optional_keywords {
        parts.push(format!("?{name}: {}", render_type(&p.ty)));
    }
    if let Some(p) = &ft.rest_keywords {
        parts.push(format!("**{}", render_param(p)));
    }
    format!("({}) -> {}", parts.join(", "), render_type(&ft.return_type))
}

fn render_block(block: &BlockSpec) -> String {
    let body = render_function_type(&block.fn_type);
    if block.required {
        body
    } else {
        format!("?{body}")
    }
}

pub fn render_method_type(mt: &MethodType) -> String {
    let mut out = String::new();
    if !mt.type_params.is_empty() {
        out.push_str(&format!("[{}] ", mt.type_params.join(", ")));
    }
    let body = render_function_type(&mt.fn_type);
    if let Some(block) = &mt.block {
        let (params, ret) = body.split_once(" -> ").unwrap_or((body.as_str(), ""));
        out.push_str(&format!("{params} {{ {} }} -> {ret}", render_block(block)));
    } else {
        out.push_str(&body);
    }
    out
}

pub fn render_overloads(overloads: &[MethodType]) -> String {
    overloads
        .iter()
        .map(render_method_type)
        .collect::<Vec<_>>()
        .join(" | ")
}

pub fn render_overload_list(overloads: &[Overload]) -> String {
    overloads
        .iter()
        .map(|o| match o {
            Overload::Super => "super".to_string(),
            Overload::Method(mt) => render_method_type(mt),
        })
        .collect::<Vec<_>>()
        .join(" | ")
}
