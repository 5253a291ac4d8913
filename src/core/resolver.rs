use crate::domain::model::Port;
use crate::domain::ports::EnvSource;

/// `${VAR:-default}`: a set, non-empty value is used as-is, anything else
/// falls back to `default`.
pub fn resolve_port(env: &dyn EnvSource, var: &str, default: &str) -> Port {
    match env.var(var) {
        Some(value) if !value.is_empty() => Port::new(value),
        _ => Port::new(default),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::env::MapEnv;
    use std::ffi::OsStr;

    #[test]
    fn test_unset_uses_default() {
        let env = MapEnv::default();
        assert_eq!(
            resolve_port(&env, "PORT", "8000").as_os_str(),
            OsStr::new("8000")
        );
    }

    #[test]
    fn test_empty_uses_default() {
        let env = MapEnv::from_pairs([("PORT", "")]);
        assert_eq!(
            resolve_port(&env, "PORT", "8000").as_os_str(),
            OsStr::new("8000")
        );
    }

    #[test]
    fn test_value_passes_through_verbatim() {
        for value in ["9090", " 9090 ", "not-a-port", "99999", "0"] {
            let env = MapEnv::from_pairs([("PORT", value)]);
            assert_eq!(
                resolve_port(&env, "PORT", "8000").as_os_str(),
                OsStr::new(value)
            );
        }
    }

    #[test]
    fn test_only_named_variable_is_read() {
        let env = MapEnv::from_pairs([("APP_PORT", "7000")]);
        assert_eq!(resolve_port(&env, "PORT", "8000").to_string(), "8000");
        assert_eq!(resolve_port(&env, "APP_PORT", "8000").to_string(), "7000");
    }

    #[cfg(unix)]
    #[test]
    fn test_non_utf8_value_is_kept() {
        use std::ffi::OsString;
        use std::os::unix::ffi::OsStringExt;

        let raw = OsString::from_vec(vec![0x38, 0xff, 0x30]);
        let env = MapEnv::from_os_pairs([(OsString::from("PORT"), raw.clone())]);
        assert_eq!(resolve_port(&env, "PORT", "8000").as_os_str(), raw.as_os_str());
    }
}
