use dialplan::number;

struct Rule {
    src: String,
    dst: String,
    time: u64,
}

/// Naive reference implementation of the forwarding table
///
/// Keeps a flat rule list and scans it on every query. Hopelessly slow, but
/// obviously correct, so the trie can be checked against it.
#[derive(Default)]
pub struct NaiveTable {
    rules: Vec<Rule>,
    removals: Vec<(String, u64)>,
    time: u64,
}

impl NaiveTable {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add(&mut self, src: &str, dst: &str) -> bool {
        if !number::is_valid(src) || !number::is_valid(dst) || src == dst {
            return false;
        }

        self.time += 1;

        // a later add on the same source overwrites the earlier one
        self.rules.retain(|rule| rule.src != src);
        self.rules.push(Rule {
            src: src.to_owned(),
            dst: dst.to_owned(),
            time: self.time,
        });

        true
    }

    pub fn remove(&mut self, prefix: &str) {
        if !number::is_valid(prefix) {
            return;
        }

        self.time += 1;
        self.removals.push((prefix.to_owned(), self.time));
    }

    fn is_active(&self, rule: &Rule) -> bool {
        !self
            .removals
            .iter()
            .any(|(prefix, time)| rule.src.starts_with(prefix.as_str()) && *time > rule.time)
    }

    pub fn forward(&self, num: &str) -> Vec<String> {
        if !number::is_valid(num) {
            return vec![];
        }

        let best = self
            .rules
            .iter()
            .filter(|rule| num.starts_with(rule.src.as_str()) && self.is_active(rule))
            .max_by_key(|rule| rule.src.len());

        let result = best.map_or_else(
            || num.to_owned(),
            |rule| format!("{}{}", rule.dst, num.get(rule.src.len()..).unwrap_or_default()),
        );

        vec![result]
    }

    pub fn reverse(&self, num: &str) -> Vec<String> {
        if !number::is_valid(num) {
            return vec![];
        }

        let mut result = vec![num.to_owned()];

        for rule in self.rules.iter().filter(|rule| self.is_active(rule)) {
            if num.starts_with(rule.dst.as_str()) {
                result.push(format!(
                    "{}{}",
                    rule.src,
                    num.get(rule.dst.len()..).unwrap_or_default()
                ));
            }
        }

        result.sort_by(|a, b| number::compare(a, b));
        result.dedup();

        result
    }
}
