// (c) Meta Platforms, Inc. and affiliates.
//
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use std::collections::BTreeMap;

/// Partition of two keyed entity collections: keys only in the baseline,
/// keys only in the current snapshot, and keys present in both.
///
/// Each partition is sorted by key, so difference emission over a
/// reconciliation is byte-identical across runs on identical input.
/// Duplicate keys within one side keep the last entity, matching how the
/// collectors overwrite repeated records.
pub(crate) struct Reconciled<'a, T> {
    pub missing: Vec<(&'a str, &'a T)>,
    pub extra: Vec<(&'a str, &'a T)>,
    pub matched: Vec<(&'a str, &'a T, &'a T)>,
}

/// Reconciles two entity slices by a natural key.
pub(crate) fn reconcile<'a, T, K>(
    baseline: &'a [T],
    current: &'a [T],
    key: K,
) -> Reconciled<'a, T>
where
    K: Fn(&'a T) -> &'a str,
{
    let baseline_by_key: BTreeMap<&str, &T> = baseline.iter().map(|e| (key(e), e)).collect();
    let current_by_key: BTreeMap<&str, &T> = current.iter().map(|e| (key(e), e)).collect();

    let mut reconciled = Reconciled {
        missing: Vec::new(),
        extra: Vec::new(),
        matched: Vec::new(),
    };

    for (k, base) in &baseline_by_key {
        match current_by_key.get(k) {
            Some(cur) => reconciled.matched.push((*k, *base, *cur)),
            None => reconciled.missing.push((*k, *base)),
        }
    }
    for (k, cur) in &current_by_key {
        if !baseline_by_key.contains_key(k) {
            reconciled.extra.push((*k, *cur));
        }
    }

    reconciled
}
