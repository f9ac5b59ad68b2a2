//! ACL assignment stage.

use longshore_core::plan::AclPolicy;
use longshore_core::types::Candidate;

/// Classify every candidate under `policy`, yielding a new sequence.
pub fn assign_acl(candidates: Vec<Candidate>, policy: &AclPolicy) -> Vec<Candidate> {
    candidates
        .into_iter()
        .map(|candidate| {
            let acl = policy.classify(&candidate.key);
            Candidate { acl, ..candidate }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use longshore_core::options::{AclOption, AclRuleSet, KeyMatch, SiteOptions, SyncOptions};
    use longshore_core::plan::resolve;
    use longshore_core::types::Acl;
    use std::path::PathBuf;

    fn candidate(key: &str) -> Candidate {
        Candidate {
            key: key.to_string(),
            path: PathBuf::from("/unused"),
            size: 1,
            acl: Acl::Private,
        }
    }

    fn policy_for(acl: AclOption) -> AclPolicy {
        let options = SyncOptions {
            acl: Some(acl),
            ..SyncOptions::default()
        };
        let site = SiteOptions {
            public_path: Some("https://cdn.example.com/".to_string()),
            ..SiteOptions::default()
        };
        resolve(&options, &site).expect("resolve").acl
    }

    #[test]
    fn uniform_policy_covers_every_candidate() {
        let policy = policy_for(AclOption::Uniform(Acl::PublicReadWrite));
        let classified = assign_acl(vec![candidate("a.js"), candidate("b.css")], &policy);
        assert!(classified.iter().all(|c| c.acl == Acl::PublicReadWrite));
    }

    #[test]
    fn later_private_rule_narrows_earlier_grant() {
        let policy = policy_for(AclOption::Rules(AclRuleSet {
            public_read: Some(KeyMatch::Pattern("\\.js$".into())),
            private: Some(KeyMatch::Keys(vec!["vendor.js".into()])),
            ..AclRuleSet::default()
        }));
        let classified = assign_acl(
            vec![candidate("app.js"), candidate("vendor.js"), candidate("a.css")],
            &policy,
        );
        let acl_of = |key: &str| {
            classified
                .iter()
                .find(|c| c.key == key)
                .map(|c| c.acl)
                .expect("candidate")
        };
        assert_eq!(acl_of("app.js"), Acl::PublicRead);
        assert_eq!(acl_of("vendor.js"), Acl::Private);
        assert_eq!(acl_of("a.css"), Acl::Private);
    }

    #[test]
    fn keys_matcher_requires_exact_key() {
        let policy = policy_for(AclOption::Rules(AclRuleSet {
            public_read: Some(KeyMatch::Keys(vec!["static/logo.png".into()])),
            ..AclRuleSet::default()
        }));
        let classified = assign_acl(
            vec![candidate("static/logo.png"), candidate("logo.png")],
            &policy,
        );
        assert_eq!(classified[0].acl, Acl::PublicRead);
        assert_eq!(classified[1].acl, Acl::Private);
    }
}
