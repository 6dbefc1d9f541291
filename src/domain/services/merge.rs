use crate::domain::entities::{LocalPackage, SearchPackage};
use std::collections::HashMap;

pub struct PackageMerger;

impl PackageMerger {
    /// Index locally installed packages by lowercased id. Winget ids are
    /// compared case-insensitively everywhere; on duplicate ids the first
    /// occurrence wins.
    fn index_local(locals: &[LocalPackage]) -> HashMap<String, &LocalPackage> {
        let mut map: HashMap<String, &LocalPackage> = HashMap::new();
        for local in locals {
            map.entry(local.id.to_lowercase()).or_insert(local);
        }
        map
    }

    /// Join search results against the installed list and order them for
    /// display: installed packages first, and among those the ones without
    /// a pending upgrade before the upgradable ones. The second key is
    /// deliberately ascending; it is long-standing observable behavior.
    pub fn merge(mut search: Vec<SearchPackage>, locals: &[LocalPackage]) -> Vec<SearchPackage> {
        let local_map = Self::index_local(locals);

        for package in &mut search {
            if let Some(local) = local_map.get(&package.id.to_lowercase()) {
                package.mark_installed(local);
            }
        }

        search.sort_by(|a, b| {
            b.installed
                .cmp(&a.installed)
                .then(a.upgradable.cmp(&b.upgradable))
        });
        search
    }
}
