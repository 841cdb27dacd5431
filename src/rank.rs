//! Ranking of sweep results.
//!
//! A [`RankPolicy`] is an ordered list of metric keys, each with a
//! preferred direction. Results are compared lexicographically: a key is
//! only consulted when every earlier key ties. The default policy favours
//! fragmented boards with few vehicle escapes and many misses, then the
//! fewest links.
//!
//! Ranking never touches the metrics themselves; it sorts indices, so any
//! rank can be looked up later without recomputation.

use std::cmp::Ordering;
use std::fmt;
use std::str::FromStr;

use rayon::prelude::*;

use crate::error::RankPolicyError;
use crate::eval::Metrics;

/// A metric that can take part in ranking.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MetricKey {
    Components,
    VehicleComponents,
    Miss,
    Unique,
    Total,
    Vehicle,
}

impl MetricKey {
    pub const ALL: [MetricKey; 6] = [
        MetricKey::Components,
        MetricKey::VehicleComponents,
        MetricKey::Miss,
        MetricKey::Unique,
        MetricKey::Total,
        MetricKey::Vehicle,
    ];

    /// Name used in policy strings.
    pub const fn name(self) -> &'static str {
        match self {
            MetricKey::Components => "components",
            MetricKey::VehicleComponents => "vehicle-components",
            MetricKey::Miss => "miss",
            MetricKey::Unique => "unique",
            MetricKey::Total => "total",
            MetricKey::Vehicle => "vehicle",
        }
    }

    pub fn from_name(s: &str) -> Option<MetricKey> {
        MetricKey::ALL.into_iter().find(|k| k.name() == s)
    }

    #[inline]
    pub fn value(self, m: &Metrics) -> u32 {
        match self {
            MetricKey::Components => m.component_count as u32,
            MetricKey::VehicleComponents => m.vehicle_component_count as u32,
            MetricKey::Miss => m.miss,
            MetricKey::Unique => m.unique,
            MetricKey::Total => m.total,
            MetricKey::Vehicle => m.vehicle,
        }
    }
}

/// Which end of a metric is better.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Preference {
    Higher,
    Lower,
}

impl Preference {
    pub const fn name(self) -> &'static str {
        match self {
            Preference::Higher => "high",
            Preference::Lower => "low",
        }
    }
}

/// One comparator key.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct RankKey {
    pub metric: MetricKey,
    pub prefer: Preference,
}

impl RankKey {
    pub const fn new(metric: MetricKey, prefer: Preference) -> Self {
        RankKey { metric, prefer }
    }
}

/// An ordered, lexicographic ranking policy.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RankPolicy {
    keys: Vec<RankKey>,
}

impl Default for RankPolicy {
    fn default() -> Self {
        RankPolicy {
            keys: vec![
                RankKey::new(MetricKey::Components, Preference::Higher),
                RankKey::new(MetricKey::VehicleComponents, Preference::Lower),
                RankKey::new(MetricKey::Miss, Preference::Higher),
                RankKey::new(MetricKey::Unique, Preference::Lower),
                RankKey::new(MetricKey::Total, Preference::Lower),
                RankKey::new(MetricKey::Vehicle, Preference::Lower),
            ],
        }
    }
}

impl RankPolicy {
    /// Builds a policy from keys. Returns an error for empty or repeated keys.
    pub fn new(keys: Vec<RankKey>) -> Result<Self, RankPolicyError> {
        if keys.is_empty() {
            return Err(RankPolicyError::Empty);
        }
        for (i, key) in keys.iter().enumerate() {
            if keys[..i].iter().any(|k| k.metric == key.metric) {
                return Err(RankPolicyError::DuplicateMetric(key.metric.name().to_string()));
            }
        }
        Ok(RankPolicy { keys })
    }

    pub fn keys(&self) -> &[RankKey] {
        &self.keys
    }

    /// Compares two results; `Ordering::Less` means `a` ranks ahead of `b`.
    pub fn compare(&self, a: &Metrics, b: &Metrics) -> Ordering {
        for key in &self.keys {
            let va = key.metric.value(a);
            let vb = key.metric.value(b);
            let ord = match key.prefer {
                Preference::Higher => vb.cmp(&va),
                Preference::Lower => va.cmp(&vb),
            };
            if ord != Ordering::Equal {
                return ord;
            }
        }
        Ordering::Equal
    }
}

impl FromStr for RankPolicy {
    type Err = RankPolicyError;

    /// Parses `"components:high,vehicle-components:low,..."`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut keys = Vec::new();
        for part in s.split(',').map(str::trim).filter(|p| !p.is_empty()) {
            let (metric, prefer) = part
                .split_once(':')
                .ok_or_else(|| RankPolicyError::MalformedKey(part.to_string()))?;
            let metric = MetricKey::from_name(metric.trim())
                .ok_or_else(|| RankPolicyError::UnknownMetric(metric.trim().to_string()))?;
            let prefer = match prefer.trim() {
                "high" => Preference::Higher,
                "low" => Preference::Lower,
                other => return Err(RankPolicyError::UnknownPreference(other.to_string())),
            };
            keys.push(RankKey::new(metric, prefer));
        }
        RankPolicy::new(keys)
    }
}

impl fmt::Display for RankPolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, key) in self.keys.iter().enumerate() {
            if i > 0 {
                f.write_str(",")?;
            }
            write!(f, "{}:{}", key.metric.name(), key.prefer.name())?;
        }
        Ok(())
    }
}

/// Results in best-first order, with random access by rank.
#[derive(Debug, Clone, Default)]
pub struct Ranking {
    results: Vec<Metrics>,
    order: Vec<u32>,
}

impl Ranking {
    pub fn len(&self) -> usize {
        self.order.len()
    }

    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }

    /// The result at `rank` (0 = best).
    pub fn get(&self, rank: usize) -> Option<&Metrics> {
        self.order.get(rank).map(|&i| &self.results[i as usize])
    }

    pub fn best(&self) -> Option<&Metrics> {
        self.get(0)
    }

    /// Iterates best-first.
    pub fn iter(&self) -> impl Iterator<Item = &Metrics> + '_ {
        self.order.iter().map(move |&i| &self.results[i as usize])
    }

    /// The unsorted results as they were collected.
    pub fn results(&self) -> &[Metrics] {
        &self.results
    }
}

/// Orders results best-first under `policy`. Ties keep no particular order.
pub fn rank(results: Vec<Metrics>, policy: &RankPolicy) -> Ranking {
    let mut order: Vec<u32> = (0..results.len() as u32).collect();
    order.par_sort_unstable_by(|&a, &b| {
        policy.compare(&results[a as usize], &results[b as usize])
    });
    Ranking { results, order }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::eval::LinkStats;

    fn metrics(
        component_count: u8,
        vehicle_component_count: u8,
        miss: u32,
        unique: u32,
        total: u32,
        vehicle: u32,
        picked_slot: u8,
    ) -> Metrics {
        LinkStats {
            total,
            unique,
            vehicle,
            miss,
            component_count,
            vehicle_component_count,
        }
        .tag([0, 1, 2, 3, 4, 5, 6, 7, 8], picked_slot)
    }

    #[test]
    fn each_key_in_priority_order() {
        let policy = RankPolicy::default();
        let base = metrics(4, 1, 3, 5, 8, 1, 0);

        // More components wins even against every lower key being worse.
        let a = metrics(5, 3, 0, 9, 9, 3, 0);
        assert_eq!(policy.compare(&a, &base), Ordering::Less);

        let b = metrics(4, 0, 0, 9, 9, 3, 0);
        assert_eq!(policy.compare(&b, &base), Ordering::Less);

        let c = metrics(4, 1, 4, 9, 9, 3, 0);
        assert_eq!(policy.compare(&c, &base), Ordering::Less);

        let d = metrics(4, 1, 3, 4, 9, 3, 0);
        assert_eq!(policy.compare(&d, &base), Ordering::Less);

        let e = metrics(4, 1, 3, 5, 7, 3, 0);
        assert_eq!(policy.compare(&e, &base), Ordering::Less);

        let f = metrics(4, 1, 3, 5, 8, 0, 0);
        assert_eq!(policy.compare(&f, &base), Ordering::Less);

        let same = metrics(4, 1, 3, 5, 8, 1, 7);
        assert_eq!(policy.compare(&same, &base), Ordering::Equal);
    }

    #[test]
    fn rank_orders_best_first() {
        let results = vec![
            metrics(2, 0, 0, 0, 0, 0, 0),
            metrics(5, 2, 0, 0, 0, 0, 1),
            metrics(5, 1, 0, 0, 0, 0, 2),
            metrics(3, 0, 9, 0, 0, 0, 3),
        ];
        let ranking = rank(results, &RankPolicy::default());
        let picks: Vec<u8> = ranking.iter().map(|m| m.picked_slot).collect();
        assert_eq!(picks, vec![2, 1, 3, 0]);
        assert_eq!(ranking.best().map(|m| m.picked_slot), Some(2));
        assert_eq!(ranking.get(3).map(|m| m.picked_slot), Some(0));
        assert!(ranking.get(4).is_none());
        assert_eq!(ranking.results().len(), 4);
    }

    #[test]
    fn ties_keep_every_result_once() {
        let results: Vec<Metrics> = (0..9).map(|p| metrics(1, 0, 0, 0, 0, 0, p)).collect();
        let ranking = rank(results, &RankPolicy::default());
        let mut picks: Vec<u8> = ranking.iter().map(|m| m.picked_slot).collect();
        picks.sort_unstable();
        assert_eq!(picks, (0..9).collect::<Vec<u8>>());
    }

    #[test]
    fn empty_ranking() {
        let ranking = rank(Vec::new(), &RankPolicy::default());
        assert!(ranking.is_empty());
        assert_eq!(ranking.len(), 0);
        assert!(ranking.best().is_none());
    }

    #[test]
    fn parse_policy() {
        let policy: RankPolicy = "components:high, unique:low".parse().unwrap();
        assert_eq!(
            policy.keys(),
            &[
                RankKey::new(MetricKey::Components, Preference::Higher),
                RankKey::new(MetricKey::Unique, Preference::Lower),
            ]
        );
        assert_eq!(policy.to_string(), "components:high,unique:low");
    }

    #[test]
    fn default_policy_display_roundtrip() {
        let policy = RankPolicy::default();
        let text = policy.to_string();
        assert_eq!(
            text,
            "components:high,vehicle-components:low,miss:high,unique:low,total:low,vehicle:low"
        );
        assert_eq!(text.parse::<RankPolicy>().unwrap(), policy);
    }

    #[test]
    fn parse_policy_errors() {
        assert_eq!("".parse::<RankPolicy>(), Err(RankPolicyError::Empty));
        assert_eq!(
            "components".parse::<RankPolicy>(),
            Err(RankPolicyError::MalformedKey("components".to_string()))
        );
        assert_eq!(
            "links:high".parse::<RankPolicy>(),
            Err(RankPolicyError::UnknownMetric("links".to_string()))
        );
        assert_eq!(
            "miss:up".parse::<RankPolicy>(),
            Err(RankPolicyError::UnknownPreference("up".to_string()))
        );
        assert_eq!(
            "miss:high,miss:low".parse::<RankPolicy>(),
            Err(RankPolicyError::DuplicateMetric("miss".to_string()))
        );
    }

    #[test]
    fn custom_policy_reverses_order() {
        let policy: RankPolicy = "total:high".parse().unwrap();
        let results = vec![metrics(1, 0, 0, 0, 3, 0, 0), metrics(1, 0, 0, 0, 7, 0, 1)];
        let ranking = rank(results, &policy);
        assert_eq!(ranking.best().map(|m| m.total), Some(7));
    }
}
