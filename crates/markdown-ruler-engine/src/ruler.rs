//! Ordered, named rule registry shared by every stage.
//!
//! A [`Ruler`] keeps rules in insertion order. Each rule belongs to the
//! default chain and may also be listed in any number of named alternate
//! chains (`alt`), which block rules use to ask "can anything interrupt
//! me here?". Lookups go through a cache that is rebuilt lazily after each
//! mutation.

use std::collections::HashMap;
use std::fmt;
use std::sync::OnceLock;

use crate::error::RulerError;

struct Rule<F> {
    name: String,
    enabled: bool,
    func: F,
    alt: Vec<String>,
}

impl<F: Copy> Clone for Rule<F> {
    fn clone(&self) -> Self {
        Self {
            name: self.name.clone(),
            enabled: self.enabled,
            func: self.func,
            alt: self.alt.clone(),
        }
    }
}

pub struct Ruler<F> {
    rules: Vec<Rule<F>>,
    cache: OnceLock<HashMap<String, Vec<F>>>,
}

impl<F: Copy> Default for Ruler<F> {
    fn default() -> Self {
        Self::new()
    }
}

impl<F: Copy> Clone for Ruler<F> {
    fn clone(&self) -> Self {
        Self {
            rules: self.rules.clone(),
            cache: OnceLock::new(),
        }
    }
}

impl<F> fmt::Debug for Ruler<F> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list()
            .entries(
                self.rules
                    .iter()
                    .map(|r| (r.name.as_str(), r.enabled, r.alt.as_slice())),
            )
            .finish()
    }
}

impl<F: Copy> Ruler<F> {
    pub fn new() -> Self {
        Self {
            rules: Vec::new(),
            cache: OnceLock::new(),
        }
    }

    fn find(&self, name: &str) -> Option<usize> {
        self.rules.iter().position(|r| r.name == name)
    }

    fn invalidate(&mut self) {
        self.cache = OnceLock::new();
    }

    fn make_rule(name: &str, func: F, alt: &[&str]) -> Rule<F> {
        Rule {
            name: name.to_string(),
            enabled: true,
            func,
            alt: alt.iter().map(|s| s.to_string()).collect(),
        }
    }

    /// Builds the chain -> functions map. The default chain is keyed by `""`.
    fn compile(&self) -> HashMap<String, Vec<F>> {
        let mut chains: Vec<&str> = vec![""];
        for rule in self.rules.iter().filter(|r| r.enabled) {
            for alt in &rule.alt {
                if !chains.contains(&alt.as_str()) {
                    chains.push(alt.as_str());
                }
            }
        }

        let compiled: HashMap<String, Vec<F>> = chains
            .iter()
            .map(|chain| {
                let funcs = self
                    .rules
                    .iter()
                    .filter(|r| r.enabled)
                    .filter(|r| {
                        chain.is_empty() || r.alt.iter().any(|a| a.as_str() == *chain)
                    })
                    .map(|r| r.func)
                    .collect();
                (chain.to_string(), funcs)
            })
            .collect();

        log::trace!("compiled rule chains: {:?}", compiled.keys());
        compiled
    }

    /// Enabled functions for `chain`, in order. `""` is the default chain;
    /// an unknown chain yields an empty slice.
    pub fn get_rules(&self, chain: &str) -> &[F] {
        self.cache
            .get_or_init(|| self.compile())
            .get(chain)
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    /// Rule names in chain order, enabled or not.
    pub fn names(&self) -> Vec<&str> {
        self.rules.iter().map(|r| r.name.as_str()).collect()
    }

    pub fn contains(&self, name: &str) -> bool {
        self.find(name).is_some()
    }

    pub fn is_enabled(&self, name: &str) -> bool {
        self.find(name).is_some_and(|i| self.rules[i].enabled)
    }

    pub fn push(&mut self, name: &str, func: F, alt: &[&str]) {
        self.rules.push(Self::make_rule(name, func, alt));
        self.invalidate();
    }

    /// Replaces the function and alt chains of an existing rule.
    pub fn at(&mut self, name: &str, func: F, alt: &[&str]) -> Result<(), RulerError> {
        let index = self
            .find(name)
            .ok_or_else(|| RulerError::RuleNotFound(name.to_string()))?;
        self.rules[index].func = func;
        self.rules[index].alt = alt.iter().map(|s| s.to_string()).collect();
        self.invalidate();
        Ok(())
    }

    pub fn before(
        &mut self,
        before_name: &str,
        name: &str,
        func: F,
        alt: &[&str],
    ) -> Result<(), RulerError> {
        let index = self
            .find(before_name)
            .ok_or_else(|| RulerError::RuleNotFound(before_name.to_string()))?;
        self.rules.insert(index, Self::make_rule(name, func, alt));
        self.invalidate();
        Ok(())
    }

    pub fn after(
        &mut self,
        after_name: &str,
        name: &str,
        func: F,
        alt: &[&str],
    ) -> Result<(), RulerError> {
        let index = self
            .find(after_name)
            .ok_or_else(|| RulerError::RuleNotFound(after_name.to_string()))?;
        self.rules.insert(index + 1, Self::make_rule(name, func, alt));
        self.invalidate();
        Ok(())
    }

    /// Returns the names that exist in this ruler. Unknown names are an
    /// error unless `ignore_invalid`; the check runs before any change.
    fn resolve<S: AsRef<str>>(
        &self,
        names: &[S],
        ignore_invalid: bool,
    ) -> Result<Vec<String>, RulerError> {
        let (found, missing): (Vec<&str>, Vec<&str>) = names
            .iter()
            .map(|name| name.as_ref())
            .partition(|name| self.find(name).is_some());

        if !missing.is_empty() && !ignore_invalid {
            return Err(RulerError::InvalidRuleNames(
                missing.into_iter().map(str::to_string).collect(),
            ));
        }
        Ok(found.into_iter().map(str::to_string).collect())
    }

    fn set_enabled(&mut self, names: &[String], enabled: bool) {
        for name in names {
            if let Some(i) = self.find(name) {
                self.rules[i].enabled = enabled;
            }
        }
        self.invalidate();
    }

    pub fn enable<S: AsRef<str>>(
        &mut self,
        names: &[S],
        ignore_invalid: bool,
    ) -> Result<Vec<String>, RulerError> {
        let found = self.resolve(names, ignore_invalid)?;
        self.set_enabled(&found, true);
        Ok(found)
    }

    pub fn disable<S: AsRef<str>>(
        &mut self,
        names: &[S],
        ignore_invalid: bool,
    ) -> Result<Vec<String>, RulerError> {
        let found = self.resolve(names, ignore_invalid)?;
        self.set_enabled(&found, false);
        Ok(found)
    }

    pub fn enable_all(&mut self) {
        for rule in &mut self.rules {
            rule.enabled = true;
        }
        self.invalidate();
    }

    /// Disables everything, then enables exactly `names`.
    pub fn enable_only<S: AsRef<str>>(
        &mut self,
        names: &[S],
        ignore_invalid: bool,
    ) -> Result<Vec<String>, RulerError> {
        let found = self.resolve(names, ignore_invalid)?;
        for rule in &mut self.rules {
            rule.enabled = false;
        }
        self.set_enabled(&found, true);
        Ok(found)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    type TestFn = fn() -> &'static str;

    fn a() -> &'static str {
        "a"
    }
    fn b() -> &'static str {
        "b"
    }
    fn c() -> &'static str {
        "c"
    }

    fn call_all(rules: &[TestFn]) -> Vec<&'static str> {
        rules.iter().map(|f| f()).collect()
    }

    fn sample() -> Ruler<TestFn> {
        let mut ruler: Ruler<TestFn> = Ruler::new();
        ruler.push("a", a, &["paragraph"]);
        ruler.push("b", b, &[]);
        ruler.push("c", c, &["paragraph", "list"]);
        ruler
    }

    #[test]
    fn default_chain_lists_enabled_rules_in_order() {
        let ruler = sample();
        assert_eq!(call_all(ruler.get_rules("")), vec!["a", "b", "c"]);
    }

    #[test]
    fn alt_chain_only_contains_members() {
        let ruler = sample();
        assert_eq!(call_all(ruler.get_rules("paragraph")), vec!["a", "c"]);
        assert_eq!(call_all(ruler.get_rules("list")), vec!["c"]);
        assert!(ruler.get_rules("nope").is_empty());
    }

    #[test]
    fn before_and_after_insert_relative_to_anchor() {
        let mut ruler = sample();
        ruler.before("b", "x", c, &[]).unwrap();
        ruler.after("b", "y", a, &[]).unwrap();
        assert_eq!(ruler.names(), vec!["a", "x", "b", "y", "c"]);
    }

    #[test]
    fn missing_anchor_is_an_error() {
        let mut ruler = sample();
        assert_eq!(
            ruler.before("zzz", "x", a, &[]),
            Err(RulerError::RuleNotFound("zzz".into()))
        );
        assert_eq!(
            ruler.at("zzz", a, &[]),
            Err(RulerError::RuleNotFound("zzz".into()))
        );
    }

    #[test]
    fn at_replaces_function_and_alt() {
        let mut ruler = sample();
        let _ = ruler.get_rules("");
        ruler.at("b", c, &["list"]).unwrap();
        assert_eq!(call_all(ruler.get_rules("")), vec!["a", "c", "c"]);
        assert_eq!(call_all(ruler.get_rules("list")), vec!["c", "c"]);
    }

    #[test]
    fn cache_is_invalidated_by_mutation() {
        let mut ruler = sample();
        assert_eq!(ruler.get_rules("").len(), 3);
        ruler.disable(&["b"], false).unwrap();
        assert_eq!(call_all(ruler.get_rules("")), vec!["a", "c"]);
        ruler.enable(&["b"], false).unwrap();
        assert_eq!(call_all(ruler.get_rules("")), vec!["a", "b", "c"]);
    }

    #[test]
    fn disabled_rule_drops_out_of_alt_chains() {
        let mut ruler = sample();
        ruler.disable(&["c"], false).unwrap();
        assert!(ruler.get_rules("list").is_empty());
        assert_eq!(call_all(ruler.get_rules("paragraph")), vec!["a"]);
    }

    #[test]
    fn unknown_names_fail_without_changing_anything() {
        let mut ruler = sample();
        let err = ruler.disable(&["a", "foo"], false).unwrap_err();
        assert_eq!(err, RulerError::InvalidRuleNames(vec!["foo".into()]));
        assert!(ruler.is_enabled("a"));
    }

    #[test]
    fn ignore_invalid_returns_found_names() {
        let mut ruler = sample();
        let found = ruler.disable(&["foo", "a"], true).unwrap();
        assert_eq!(found, vec!["a".to_string()]);
        assert!(!ruler.is_enabled("a"));
    }

    #[test]
    fn enable_only_disables_the_rest() {
        let mut ruler = sample();
        ruler.enable_only(&["b"], false).unwrap();
        assert_eq!(call_all(ruler.get_rules("")), vec!["b"]);
        assert!(ruler.get_rules("paragraph").is_empty());
    }
}
