//! Single entry point for obtaining the process-wide magic tables.
//!
//! Without the `load_magic` feature, tables are generated by random
//! search once per process and cached behind a `OnceCell`. With it,
//! callers are expected to supply precomputed tables out-of-band (e.g.
//! bundled via `bincode`); this crate always falls back to generation
//! since no bundled table ships with it.

use super::precompute::{MagicTableSeed, generate_magic_tables};
use super::structs::MagicTables;
use once_cell::sync::OnceCell;

fn build() -> MagicTables {
    #[cfg(feature = "deterministic_magic")]
    let seed = MagicTableSeed::Fixed(0x5151_C5D3);
    #[cfg(not(feature = "deterministic_magic"))]
    let seed = MagicTableSeed::Random;

    generate_magic_tables(seed).expect("magic number search failed")
}

/// Returns a fresh, process-local copy of the magic tables, generating
/// them on first use and cloning the cached result afterwards.
///
/// Tables hold `Box<[u64]>` attack arrays behind `Vec<MagicEntry>`, so a
/// clone is a handful of heap copies, not a recomputation.
pub fn load_magic_tables() -> MagicTables {
    static TABLES: OnceCell<CachedTables> = OnceCell::new();
    TABLES.get_or_init(|| CachedTables(build())).clone_tables()
}

struct CachedTables(MagicTables);

impl CachedTables {
    fn clone_tables(&self) -> MagicTables {
        MagicTables {
            rook: super::structs::RookMagicTables {
                entries: self.0.rook.entries.clone(),
            },
            bishop: super::structs::BishopMagicTables {
                entries: self.0.bishop.entries.clone(),
            },
        }
    }
}
