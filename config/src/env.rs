use crate::{Config, ConfigError};

/// Overlays environment variables onto `config`.
///
/// Takes the variables as an iterator so callers (and tests) decide where
/// they come from. Empty values are ignored.
pub fn apply_env<I>(config: &mut Config, vars: I) -> Result<(), ConfigError>
where
    I: IntoIterator<Item = (String, String)>,
{
    for (key, value) in vars {
        if value.is_empty() {
            continue;
        }
        match key.as_str() {
            "GRAPH_DB_TYPE" => config.graph.db_type = value,
            "NEO4J_URI" => config.graph.uri = Some(value),
            "NEO4J_USER" => config.graph.user = Some(value),
            "NEO4J_PASSWORD" => config.graph.password = Some(value),
            "NEO4J_DATABASE" => config.graph.database = value,
            "LLM_PROVIDER" => config.llm.provider = Some(value),
            "LLM_MODEL" => config.llm.model = Some(value),
            "LLM_BASE_URL" => config.llm.base_url = Some(value),
            "DEEPSEEK_API_KEY" => config.llm.deepseek_api_key = Some(value),
            "OPENAI_API_KEY" => config.llm.openai_api_key = Some(value),
            "CLAUDE_API_KEY" => config.llm.claude_api_key = Some(value),
            "CHAINWALK_MAX_HOPS" => {
                let hops = value.parse().map_err(|_| ConfigError::Invalid {
                    key: "CHAINWALK_MAX_HOPS",
                    value: value.clone(),
                })?;
                config.walk.max_hops = Some(hops);
            }
            _ => {}
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn vars(pairs: &[(&str, &str)]) -> Vec<(String, String)> {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    #[test]
    fn environment_overrides_file_values() {
        let mut config = Config::default();
        config.graph.uri = Some("http://file:7474".to_string());
        config.llm.provider = Some("openai".to_string());

        apply_env(
            &mut config,
            vars(&[
                ("NEO4J_URI", "http://env:7474"),
                ("NEO4J_USER", "neo4j"),
                ("NEO4J_PASSWORD", "secret"),
                ("LLM_PROVIDER", "deepseek"),
                ("DEEPSEEK_API_KEY", "sk-ds"),
                ("PATH", "/usr/bin"),
            ]),
        )
        .unwrap();

        assert_eq!(config.graph.uri.as_deref(), Some("http://env:7474"));
        assert_eq!(config.graph.user.as_deref(), Some("neo4j"));
        assert_eq!(config.graph.password.as_deref(), Some("secret"));
        assert_eq!(config.llm.provider.as_deref(), Some("deepseek"));
        assert_eq!(config.llm.deepseek_api_key.as_deref(), Some("sk-ds"));
    }

    #[test]
    fn empty_values_are_ignored() {
        let mut config = Config::default();
        config.llm.openai_api_key = Some("sk-file".to_string());
        apply_env(&mut config, vars(&[("OPENAI_API_KEY", "")])).unwrap();
        assert_eq!(config.llm.openai_api_key.as_deref(), Some("sk-file"));
    }

    #[test]
    fn max_hops_must_be_numeric() {
        let mut config = Config::default();
        let err = apply_env(&mut config, vars(&[("CHAINWALK_MAX_HOPS", "many")])).unwrap_err();
        assert!(matches!(err, ConfigError::Invalid { key: "CHAINWALK_MAX_HOPS", .. }));

        apply_env(&mut config, vars(&[("CHAINWALK_MAX_HOPS", "12")])).unwrap();
        assert_eq!(config.walk.max_hops, Some(12));
    }
}
