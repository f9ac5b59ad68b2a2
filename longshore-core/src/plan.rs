//! Configuration resolver: raw options in, canonical [`SyncPlan`] out.
//!
//! # Addressing modes
//!
//! Exactly one of three strategies decides where objects go:
//! 1. an explicit `bucket.endpoint`;
//! 2. a `bucket.region` + `bucket.name` pair;
//! 3. virtual-host addressing — only when all three are absent, the endpoint
//!    is derived from the host of `site.public_path` and the key prefix from
//!    its path.
//!
//! An unparseable `public_path` is fatal in mode 3 (there is no other way to
//! address the store) and harmless otherwise (the literal string becomes the
//! prefix).

use std::collections::BTreeMap;

use regex::Regex;
use url::Url;

use crate::error::ConfigError;
use crate::options::{AclOption, AclRuleSet, IgnoreRules, KeyMatch, SiteOptions, SyncOptions};
use crate::types::{Acl, SizeRange};

/// Header whose value doubles as a uniform ACL when no `acl` option is set.
pub const ACL_HEADER: &str = "x-oss-object-acl";

/// Key extensions excluded when the config omits `ignore.extensions`.
pub const DEFAULT_EXCLUDED_EXTENSIONS: [&str; 2] = [".html", ".htm"];

// ---------------------------------------------------------------------------
// ACL policy
// ---------------------------------------------------------------------------

/// How an ACL rule selects keys, with its pattern compiled.
#[derive(Debug, Clone)]
pub enum AclMatcher {
    Keys(Vec<String>),
    Pattern(Regex),
}

impl AclMatcher {
    fn matches(&self, key: &str) -> bool {
        match self {
            AclMatcher::Keys(keys) => keys.iter().any(|k| k == key),
            AclMatcher::Pattern(pattern) => pattern.is_match(key),
        }
    }
}

/// One (matcher, classification) pair.
#[derive(Debug, Clone)]
pub struct AclRule {
    pub matcher: AclMatcher,
    pub acl: Acl,
}

/// Ordered rule list plus fallback. The *last* matching rule wins.
#[derive(Debug, Clone)]
pub struct AclRules {
    pub fallback: Acl,
    pub rules: Vec<AclRule>,
}

impl AclRules {
    fn classify(&self, key: &str) -> Acl {
        let mut acl = self.fallback;
        for rule in &self.rules {
            if rule.matcher.matches(key) {
                acl = rule.acl;
            }
        }
        acl
    }
}

/// Canonical ACL policy: one classification for everything, or a rule list.
#[derive(Debug, Clone)]
pub enum AclPolicy {
    Uniform(Acl),
    Rules(AclRules),
}

impl AclPolicy {
    /// Classification for `key` under this policy.
    pub fn classify(&self, key: &str) -> Acl {
        match self {
            AclPolicy::Uniform(acl) => *acl,
            AclPolicy::Rules(rules) => rules.classify(key),
        }
    }
}

// ---------------------------------------------------------------------------
// Sync plan
// ---------------------------------------------------------------------------

/// Canonical, fully-defaulted description of one sync run.
#[derive(Debug, Clone)]
pub struct SyncPlan {
    /// Storage endpoint host (with port when present).
    pub endpoint: Option<String>,
    pub bucket: Option<String>,
    pub region: Option<String>,
    /// Key prefix: no leading slash, trailing slash unless empty.
    /// The empty prefix denotes the bucket root.
    pub prefix: String,
    /// Whether the endpoint was derived from `public_path`.
    pub virtual_host: bool,
    pub acl: AclPolicy,
    pub bijection: bool,
    pub exists_in_remote: bool,
    /// Key extensions to exclude, every entry dot-prefixed.
    pub extensions: Vec<String>,
    pub size_between: Vec<SizeRange>,
    pub headers: BTreeMap<String, String>,
    pub access_key_id: Option<String>,
    pub access_key_secret: Option<String>,
}

impl SyncPlan {
    /// Where the report says files go: the endpoint, else the bucket name.
    pub fn target(&self) -> String {
        self.endpoint
            .clone()
            .or_else(|| self.bucket.clone())
            .unwrap_or_default()
    }

    /// Whether this run needs the remote key listing up front.
    pub fn needs_remote(&self) -> bool {
        self.bijection || self.exists_in_remote
    }
}

// ---------------------------------------------------------------------------
// Resolve
// ---------------------------------------------------------------------------

/// Resolve raw options and site metadata into a [`SyncPlan`].
///
/// The single hard precondition: a `public_path` or an explicit
/// `bucket.name` must exist, otherwise there is nothing to address.
pub fn resolve(options: &SyncOptions, site: &SiteOptions) -> Result<SyncPlan, ConfigError> {
    if site.public_path.is_none() && options.bucket.name.is_none() {
        return Err(ConfigError::NoTarget);
    }

    let public_path = site.public_path.clone().unwrap_or_default();
    let mut endpoint = options.bucket.endpoint.clone();
    let mut prefix = public_path.clone();

    let virtual_host = endpoint.is_none()
        && options.bucket.region.is_none()
        && options.bucket.name.is_none();
    if virtual_host {
        let url = Url::parse(&public_path).map_err(|e| ConfigError::Endpoint {
            public_path: public_path.clone(),
            reason: e.to_string(),
        })?;
        let host = url.host_str().ok_or_else(|| ConfigError::Endpoint {
            public_path: public_path.clone(),
            reason: "URL has no host".to_string(),
        })?;
        endpoint = Some(match url.port() {
            Some(port) => format!("{host}:{port}"),
            None => host.to_string(),
        });
        prefix = url.path().to_string();
    } else if let Ok(url) = Url::parse(&public_path) {
        // With an explicit target the public path only contributes the
        // prefix; a bare string that is not a URL is taken literally.
        prefix = url.path().to_string();
    }
    let prefix = normalize_prefix(&prefix);

    let acl = resolve_acl(options)?;
    tracing::debug!(
        "resolved plan: endpoint={endpoint:?} bucket={:?} prefix={prefix:?} virtual_host={virtual_host}",
        options.bucket.name,
    );

    Ok(SyncPlan {
        endpoint,
        bucket: options.bucket.name.clone(),
        region: options.bucket.region.clone(),
        prefix,
        virtual_host,
        acl,
        bijection: options.bijection,
        exists_in_remote: options.ignore.exists_in_remote,
        extensions: resolve_extensions(&options.ignore),
        size_between: options.ignore.size_between.clone().unwrap_or_default(),
        headers: options.headers.clone(),
        access_key_id: options.access_key_id.clone(),
        access_key_secret: options.access_key_secret.clone(),
    })
}

/// Normalize a raw prefix: ensure a trailing slash, then strip any leading
/// slash. `""` and `"/"` both become the empty prefix.
pub fn normalize_prefix(raw: &str) -> String {
    let mut prefix = raw.to_string();
    if !prefix.ends_with('/') {
        prefix.push('/');
    }
    match prefix.strip_prefix('/') {
        Some(stripped) => stripped.to_string(),
        None => prefix,
    }
}

fn resolve_extensions(ignore: &IgnoreRules) -> Vec<String> {
    let raw = match &ignore.extensions {
        Some(extensions) => extensions.clone(),
        None => DEFAULT_EXCLUDED_EXTENSIONS
            .iter()
            .map(|e| e.to_string())
            .collect(),
    };
    // Tolerate entries written without the dot.
    raw.into_iter()
        .map(|e| {
            if e.starts_with('.') {
                e
            } else {
                format!(".{e}")
            }
        })
        .collect()
}

fn resolve_acl(options: &SyncOptions) -> Result<AclPolicy, ConfigError> {
    if let Some(acl) = &options.acl {
        return match acl {
            AclOption::Uniform(acl) => Ok(AclPolicy::Uniform(*acl)),
            AclOption::Rules(set) => Ok(AclPolicy::Rules(build_rules(set)?)),
        };
    }
    if let Some(value) = options.headers.get(ACL_HEADER) {
        let acl = value.parse::<Acl>().map_err(|_| ConfigError::HeaderAcl {
            header: ACL_HEADER.to_string(),
            value: value.clone(),
        })?;
        return Ok(AclPolicy::Uniform(acl));
    }
    Ok(AclPolicy::Uniform(Acl::Private))
}

/// Only supplied rules make the list, in the fixed evaluation order:
/// `public_read_write`, `public_read`, `private`.
fn build_rules(set: &AclRuleSet) -> Result<AclRules, ConfigError> {
    let mut rules = Vec::new();
    for (source, acl) in [
        (&set.public_read_write, Acl::PublicReadWrite),
        (&set.public_read, Acl::PublicRead),
        (&set.private, Acl::Private),
    ] {
        if let Some(key_match) = source {
            rules.push(AclRule {
                matcher: compile_matcher(key_match)?,
                acl,
            });
        }
    }
    Ok(AclRules {
        fallback: set.fallback.unwrap_or_default(),
        rules,
    })
}

fn compile_matcher(key_match: &KeyMatch) -> Result<AclMatcher, ConfigError> {
    match key_match {
        KeyMatch::Keys(keys) => Ok(AclMatcher::Keys(keys.clone())),
        KeyMatch::Pattern(pattern) => Regex::new(pattern)
            .map(AclMatcher::Pattern)
            .map_err(|e| ConfigError::Pattern {
                pattern: pattern.clone(),
                source: e,
            }),
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use crate::options::BucketOptions;

    fn site(public_path: &str) -> SiteOptions {
        SiteOptions {
            public_path: Some(public_path.to_string()),
            ..SiteOptions::default()
        }
    }

    #[test]
    fn no_public_path_and_no_bucket_is_rejected() {
        let err = resolve(&SyncOptions::default(), &SiteOptions::default()).unwrap_err();
        assert!(matches!(err, ConfigError::NoTarget), "got: {err}");
        assert!(err.to_string().contains("no valid bucket configuration"));
    }

    #[test]
    fn virtual_host_derives_endpoint_and_prefix() {
        let plan = resolve(&SyncOptions::default(), &site("https://cdn.example.com/assets"))
            .expect("resolve");
        assert!(plan.virtual_host);
        assert_eq!(plan.endpoint.as_deref(), Some("cdn.example.com"));
        assert_eq!(plan.prefix, "assets/");
    }

    #[test]
    fn virtual_host_keeps_explicit_port() {
        let plan = resolve(&SyncOptions::default(), &site("http://cdn.example.com:8080/a"))
            .expect("resolve");
        assert_eq!(plan.endpoint.as_deref(), Some("cdn.example.com:8080"));
        assert_eq!(plan.prefix, "a/");
    }

    #[test]
    fn virtual_host_rejects_unparseable_public_path() {
        let err = resolve(&SyncOptions::default(), &site("/static/")).unwrap_err();
        assert!(matches!(err, ConfigError::Endpoint { .. }), "got: {err}");
        assert!(err.to_string().contains("/static/"));
    }

    #[test]
    fn explicit_bucket_takes_prefix_from_url_path() {
        let options = SyncOptions {
            bucket: BucketOptions {
                name: Some("my-bucket".into()),
                region: Some("my-region".into()),
                endpoint: None,
            },
            ..SyncOptions::default()
        };
        let plan = resolve(&options, &site("https://cdn.example.com/assets")).expect("resolve");
        assert!(!plan.virtual_host);
        assert_eq!(plan.endpoint, None);
        assert_eq!(plan.bucket.as_deref(), Some("my-bucket"));
        assert_eq!(plan.prefix, "assets/");
        assert_eq!(plan.target(), "my-bucket");
    }

    #[test]
    fn explicit_bucket_degrades_bare_public_path_to_literal_prefix() {
        let options = SyncOptions {
            bucket: BucketOptions {
                name: Some("my-bucket".into()),
                ..BucketOptions::default()
            },
            ..SyncOptions::default()
        };
        let plan = resolve(&options, &site("local-assets")).expect("resolve");
        assert_eq!(plan.prefix, "local-assets/");
    }

    #[test]
    fn bucket_without_public_path_gets_empty_prefix() {
        let options = SyncOptions {
            bucket: BucketOptions {
                name: Some("my-bucket".into()),
                region: Some("my-region".into()),
                endpoint: None,
            },
            ..SyncOptions::default()
        };
        let plan = resolve(&options, &SiteOptions::default()).expect("resolve");
        assert_eq!(plan.prefix, "");
        assert_eq!(plan.target(), "my-bucket");
    }

    #[test]
    fn explicit_endpoint_wins_over_derivation() {
        let options = SyncOptions {
            bucket: BucketOptions {
                endpoint: Some("storage.example.com".into()),
                ..BucketOptions::default()
            },
            ..SyncOptions::default()
        };
        let plan = resolve(&options, &site("https://cdn.example.com/assets")).expect("resolve");
        assert!(!plan.virtual_host);
        assert_eq!(plan.endpoint.as_deref(), Some("storage.example.com"));
        assert_eq!(plan.prefix, "assets/");
        assert_eq!(plan.target(), "storage.example.com");
    }

    #[test]
    fn acl_defaults_to_uniform_private() {
        let plan =
            resolve(&SyncOptions::default(), &site("https://cdn.example.com/")).expect("resolve");
        assert_eq!(plan.acl.classify("anything.js"), Acl::Private);
    }

    #[test]
    fn acl_header_overrides_default() {
        let mut options = SyncOptions::default();
        options
            .headers
            .insert(ACL_HEADER.to_string(), "public-read".to_string());
        let plan = resolve(&options, &site("https://cdn.example.com/")).expect("resolve");
        assert_eq!(plan.acl.classify("anything.js"), Acl::PublicRead);
    }

    #[test]
    fn acl_header_with_unknown_value_is_rejected() {
        let mut options = SyncOptions::default();
        options
            .headers
            .insert(ACL_HEADER.to_string(), "world-writable".to_string());
        let err = resolve(&options, &site("https://cdn.example.com/")).unwrap_err();
        assert!(matches!(err, ConfigError::HeaderAcl { .. }), "got: {err}");
        assert!(err.to_string().contains("world-writable"));
    }

    #[test]
    fn acl_rules_apply_last_match_wins() {
        let yaml = "public_read: '\\.js$'\nprivate: [vendor.js]\n";
        let rules: AclRuleSet = serde_yaml::from_str(yaml).expect("parse");
        let options = SyncOptions {
            acl: Some(AclOption::Rules(rules)),
            ..SyncOptions::default()
        };
        let plan = resolve(&options, &site("https://cdn.example.com/")).expect("resolve");
        assert_eq!(plan.acl.classify("app.js"), Acl::PublicRead);
        assert_eq!(plan.acl.classify("vendor.js"), Acl::Private);
        assert_eq!(plan.acl.classify("style.css"), Acl::Private);
    }

    #[test]
    fn acl_rules_fallback_is_configurable() {
        let rules = AclRuleSet {
            fallback: Some(Acl::PublicRead),
            ..AclRuleSet::default()
        };
        let options = SyncOptions {
            acl: Some(AclOption::Rules(rules)),
            ..SyncOptions::default()
        };
        let plan = resolve(&options, &site("https://cdn.example.com/")).expect("resolve");
        assert_eq!(plan.acl.classify("style.css"), Acl::PublicRead);
    }

    #[test]
    fn invalid_acl_pattern_is_rejected() {
        let rules = AclRuleSet {
            public_read: Some(KeyMatch::Pattern("[".into())),
            ..AclRuleSet::default()
        };
        let options = SyncOptions {
            acl: Some(AclOption::Rules(rules)),
            ..SyncOptions::default()
        };
        let err = resolve(&options, &site("https://cdn.example.com/")).unwrap_err();
        assert!(matches!(err, ConfigError::Pattern { .. }), "got: {err}");
    }

    #[test]
    fn extensions_default_and_normalize() {
        let plan =
            resolve(&SyncOptions::default(), &site("https://cdn.example.com/")).expect("resolve");
        assert_eq!(plan.extensions, vec![".html".to_string(), ".htm".to_string()]);

        let options = SyncOptions {
            ignore: IgnoreRules {
                extensions: Some(vec!["map".into(), ".txt".into()]),
                ..IgnoreRules::default()
            },
            ..SyncOptions::default()
        };
        let plan = resolve(&options, &site("https://cdn.example.com/")).expect("resolve");
        assert_eq!(plan.extensions, vec![".map".to_string(), ".txt".to_string()]);
    }

    #[test]
    fn empty_extension_list_disables_exclusion() {
        let options = SyncOptions {
            ignore: IgnoreRules {
                extensions: Some(vec![]),
                ..IgnoreRules::default()
            },
            ..SyncOptions::default()
        };
        let plan = resolve(&options, &site("https://cdn.example.com/")).expect("resolve");
        assert!(plan.extensions.is_empty());
    }
}
