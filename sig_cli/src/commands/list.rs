use sig_analysis::Environment;

/// `list [--class|--module|--interface]` (spec §6). With no flags, every
/// kind is listed.
pub fn run(env: &Environment, class: bool, module: bool, interface: bool) {
    let show_all = !class && !module && !interface;

    let mut names: Vec<(String, &'static str)> = Vec::new();

    if show_all || class || module {
        for (name, entry) in &env.class_decls {
            let kind = if entry.is_module() { "module" } else { "class" };
            if (kind == "class" && (show_all || class)) || (kind == "module" && (show_all || module)) {
                names.push((name.to_string(), kind));
            }
        }
    }
    if show_all || interface {
        for name in env.interface_decls.keys() {
            names.push((name.to_string(), "interface"));
        }
    }

    names.sort();
    for (name, kind) in names {
        println!("{kind:<9} {name}");
    }
}
