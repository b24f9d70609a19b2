/// Builds `h_<module>_<filter>_<variable>[_<tag>]`, lower-cased.
///
/// Empty components are dropped, so an aggregate histogram can pass an empty
/// filter name.
pub fn qa_hist_name(module: &str, filter: &str, variable: &str, tag: &str) -> String {
    let mut name = String::from("h");
    for part in [module, filter, variable, tag] {
        if !part.is_empty() {
            name.push('_');
            name.push_str(part);
        }
    }
    name.to_lowercase()
}

/// Names for several variables sharing one module/filter prefix.
pub fn make_qa_hist_names(variables: &[&str], module: &str, filter: &str, tag: &str) -> Vec<String> {
    variables
        .iter()
        .map(|var| qa_hist_name(module, filter, var, tag))
        .collect()
}
