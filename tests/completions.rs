//! Completion behavior across the path, completer, and session modules.

use std::collections::HashMap;
use std::sync::Arc;

use flagpath::{
    Completer, ConfigDefaults, DefaultPathSource, FlagpathError, Lister, ResourcePath, Result,
    Session,
};

fn fixed_defaults(path: &'static str) -> Arc<dyn DefaultPathSource> {
    Arc::new(move |_config: Option<&str>| -> Result<ResourcePath> {
        Ok(ResourcePath::from(path))
    })
}

fn lister_at(expected_parent: &'static str, children: &'static [&'static str]) -> Arc<dyn Lister> {
    Arc::new(move |parent: &ResourcePath| -> Result<Vec<String>> {
        assert_eq!(parent.as_str(), expected_parent);
        Ok(children.iter().map(|child| child.to_string()).collect())
    })
}

#[test]
fn test_relative_completion_uses_default_path() {
    let completer = Completer::new(
        fixed_defaults("/defaultProj/defaultEnv"),
        None,
        vec![
            None,
            Some(lister_at("/defaultProj/defaultEnv", &["flagA"])),
        ],
    );
    let completions = completer.completions("").unwrap();
    assert_eq!(completions, ["/", "flagA"]);
}

#[test]
fn test_absolute_completion_at_root() {
    let completer = Completer::new(
        fixed_defaults("/defaultProj/defaultEnv"),
        None,
        vec![Some(lister_at("/", &["projA"]))],
    );
    let completions = completer.completions("/").unwrap();
    assert_eq!(completions, ["/...", "//", "/projA"]);
}

#[test]
fn test_results_are_sorted() {
    let unsorted = Arc::new(|_parent: &ResourcePath| -> Result<Vec<String>> {
        Ok(vec![
            "flagB".to_string(),
            "flagC".to_string(),
            "flagA".to_string(),
        ])
    }) as Arc<dyn Lister>;
    let completer = Completer::new(
        fixed_defaults("/defaultProj/defaultEnv"),
        None,
        vec![None, None, Some(unsorted)],
    );
    let completions = completer.completions("").unwrap();
    assert_eq!(completions, ["/", "flagA", "flagB", "flagC"]);
}

#[test]
fn test_partial_paths_get_slash_suffix() {
    let completer = Completer::new(
        fixed_defaults("/defaultProj/defaultEnv"),
        None,
        vec![Some(lister_at("/", &["projA"])), None],
    );
    let completions = completer.completions("/").unwrap();
    assert_eq!(completions, ["/.../", "//", "/projA/"]);
}

#[test]
fn test_config_qualified_completion() {
    let defaults = Arc::new(|config: Option<&str>| -> Result<ResourcePath> {
        assert_eq!(config, Some("configA"));
        Ok(ResourcePath::from("/defaultProj/defaultEnv"))
    }) as Arc<dyn DefaultPathSource>;
    let completer = Completer::new(
        defaults,
        None,
        vec![
            None,
            None,
            Some(lister_at("//configA/defaultProj/defaultEnv", &["flagA"])),
        ],
    );
    let completions = completer.completions("//configA/.../.../").unwrap();
    assert_eq!(completions, ["//configA/.../.../flagA"]);
}

#[test]
fn test_config_listing() {
    let completer = Completer::new(
        fixed_defaults("/defaultProj/defaultEnv"),
        Some(lister_at("//", &["my-config"])),
        Vec::new(),
    );
    let completions = completer.completions("//").unwrap();
    assert_eq!(completions, ["//my-config/"]);
}

#[test]
fn test_no_default_placeholder_past_root() {
    let completer = Completer::new(
        fixed_defaults("/defaultProj/defaultEnv"),
        None,
        vec![None, Some(lister_at("/projA", &["envB"]))],
    );
    let completions = completer.completions("/projA/").unwrap();
    assert_eq!(completions, ["/projA/envB"]);
}

#[test]
fn test_lister_error_propagates() {
    let failing = Arc::new(|_parent: &ResourcePath| -> Result<Vec<String>> {
        Err(FlagpathError::Backend("502 Bad Gateway".into()))
    }) as Arc<dyn Lister>;
    let completer = Completer::new(
        fixed_defaults("/defaultProj/defaultEnv"),
        None,
        vec![Some(failing)],
    );
    let result = completer.completions("/");
    assert!(matches!(result, Err(FlagpathError::Backend(_))));
}

#[test]
fn test_default_source_error_propagates() {
    let defaults = Arc::new(|_config: Option<&str>| -> Result<ResourcePath> {
        Err(FlagpathError::UnknownConfig("gone".to_string()))
    }) as Arc<dyn DefaultPathSource>;
    let completer = Completer::new(defaults, None, vec![None]);
    let result = completer.completions("");
    assert!(matches!(result, Err(FlagpathError::UnknownConfig(_))));
}

#[test]
fn test_missing_lister_yields_no_completions() {
    let completer = Completer::new(
        fixed_defaults("/defaultProj/defaultEnv"),
        None,
        vec![None],
    );
    // Relative input selects the (absent) leaf lister
    assert!(completer.completions("").unwrap().is_empty());
    // Deeper than the configured chain
    assert!(completer.completions("/a/b/").unwrap().is_empty());
}

#[test]
fn test_session_backed_completion() {
    let mut configs = HashMap::new();
    configs.insert(
        "prod".to_string(),
        ConfigDefaults {
            project: "web".to_string(),
            environment: "production".to_string(),
        },
    );
    configs.insert(
        "dev".to_string(),
        ConfigDefaults {
            project: "web".to_string(),
            environment: "local".to_string(),
        },
    );
    let session = Session::with_configs(configs);
    session.set_current_project("web".to_string());
    session.set_current_environment("local".to_string());

    let config_lister = {
        let session = session.clone();
        Arc::new(move |_parent: &ResourcePath| -> Result<Vec<String>> {
            Ok(session.config_keys())
        }) as Arc<dyn Lister>
    };
    let flag_lister = Arc::new(|parent: &ResourcePath| -> Result<Vec<String>> {
        assert_eq!(parent.as_str(), "/web/local");
        Ok(vec!["checkout-redesign".to_string()])
    }) as Arc<dyn Lister>;

    let completer = Completer::new(
        Arc::new(session),
        Some(config_lister),
        vec![None, Some(flag_lister)],
    );

    assert_eq!(
        completer.completions("//").unwrap(),
        ["//dev/", "//prod/"]
    );
    assert_eq!(
        completer.completions("").unwrap(),
        ["/", "checkout-redesign"]
    );
}
