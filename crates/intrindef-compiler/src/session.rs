//! Caller-owned cache for one generation run.
//!
//! A [`Session`] resolves its declaration file once. The intrinsic table and
//! the permutations of each overload are built on first request and shared
//! afterwards. Hashes are registered across every overload permuted through
//! the session, so two overloads that hash to the same short id are caught
//! even though [`permute`] only checks within one overload.

use std::collections::HashMap;
use std::sync::{Arc, Mutex, OnceLock};

use intrindef_table::IntrinsicTable;

use crate::diagnostics::GenerationError;
use crate::emit::build_intrinsic_table;
use crate::permute::{Permutation, PermuteOptions, permute};
use crate::sem::{OverloadId, Sem};
use crate::{Error, Result};

pub struct Session {
    source: String,
    origin: String,
    sem: Sem,
    options: PermuteOptions,
    table: OnceLock<std::result::Result<Arc<IntrinsicTable>, GenerationError>>,
    permutations: Mutex<HashMap<OverloadId, Arc<Vec<Permutation>>>>,
    /// Description of every hash handed out so far.
    hashes: Mutex<HashMap<String, String>>,
}

impl Session {
    /// Parse and resolve `source`, labelling positions with `origin`.
    pub fn new(source: impl Into<String>, origin: impl Into<String>) -> Result<Self> {
        let source = source.into();
        let origin = origin.into();
        let sem = crate::resolve(&source, &origin)?;
        Ok(Self {
            source,
            origin,
            sem,
            options: PermuteOptions::default(),
            table: OnceLock::new(),
            permutations: Mutex::new(HashMap::new()),
            hashes: Mutex::new(HashMap::new()),
        })
    }

    pub fn with_options(mut self, options: PermuteOptions) -> Self {
        self.options = options;
        self
    }

    pub fn source(&self) -> &str {
        &self.source
    }

    pub fn origin(&self) -> &str {
        &self.origin
    }

    pub fn options(&self) -> &PermuteOptions {
        &self.options
    }

    /// The resolved declarations.
    pub fn sem(&self) -> &Sem {
        &self.sem
    }

    /// The intrinsic table, built on first call.
    pub fn intrinsic_table(&self) -> Result<Arc<IntrinsicTable>> {
        self.table
            .get_or_init(|| build_intrinsic_table(&self.sem).map(Arc::new))
            .clone()
            .map_err(Error::from)
    }

    /// Permutations of `overload`, built on first call.
    pub fn permutations(&self, overload: OverloadId) -> Result<Arc<Vec<Permutation>>> {
        if let Some(cached) = self.lock_permutations().get(&overload) {
            return Ok(Arc::clone(cached));
        }

        let perms = permute(&self.sem, overload, &self.options)?;
        self.register_hashes(overload, &perms)?;

        let perms = Arc::new(perms);
        let mut cache = self.lock_permutations();
        let entry = cache.entry(overload).or_insert(perms);
        Ok(Arc::clone(entry))
    }

    /// Permutations of every overload, in intrinsic table order.
    pub fn all_permutations(&self) -> Result<Vec<(OverloadId, Arc<Vec<Permutation>>)>> {
        let mut out = Vec::new();
        for (_, intrinsics) in self.sem.families() {
            for &intrinsic in intrinsics {
                for &overload in &self.sem[intrinsic].overloads {
                    out.push((overload, self.permutations(overload)?));
                }
            }
        }
        Ok(out)
    }

    fn register_hashes(&self, overload: OverloadId, perms: &[Permutation]) -> Result<()> {
        let mut hashes = self.hashes.lock().unwrap_or_else(|e| e.into_inner());
        for perm in perms {
            match hashes.get(&perm.hash) {
                Some(existing) if *existing != perm.description => {
                    return Err(crate::permute::collision(&self.sem[overload], existing, perm).into());
                }
                Some(_) => {}
                None => {
                    hashes.insert(perm.hash.clone(), perm.description.clone());
                }
            }
        }
        Ok(())
    }

    fn lock_permutations(
        &self,
    ) -> std::sync::MutexGuard<'_, HashMap<OverloadId, Arc<Vec<Permutation>>>> {
        self.permutations.lock().unwrap_or_else(|e| e.into_inner())
    }
}
