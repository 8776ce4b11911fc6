use arvox_core::types::{ColorIndex, StorageKey};

/// Stable identity of a voxel record: its position in the store.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct SlotId(pub u32);

impl SlotId {
    pub fn index(self) -> usize {
        self.0 as usize
    }
}

/// One voxel record. Freed records keep their key so the slot can be reused.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Voxel {
    pub color: ColorIndex,
    pub key: StorageKey,
    pub live: bool,
}

/// Result of looking up a storage key.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Lookup {
    /// A live record occupies the key.
    Merged(SlotId),
    /// No live record, but a freed record with this key can be resurrected.
    Reusable(SlotId),
    /// No record has ever used this key (or it was undone).
    Empty,
}

/// What `place` did to the store.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Placement {
    Created,
    Reused,
    Merged,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PlaceOutcome {
    pub slot: SlotId,
    pub kind: Placement,
}

/// Growable voxel store with slot reuse.
///
/// At most one live record exists per key: every insertion goes through
/// [`VoxelStore::lookup`]. Removed records are only flagged as freed and are
/// reused by the next placement on the same key.
#[derive(Debug, Clone, Default)]
pub struct VoxelStore {
    records: Vec<Voxel>,
    free_count: usize,
}

impl VoxelStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Scan records in insertion order for `key`.
    ///
    /// A live match wins over any freed match; otherwise the earliest freed
    /// record is offered for reuse.
    pub fn lookup(&self, key: StorageKey) -> Lookup {
        let mut reusable = None;
        for (i, voxel) in self.records.iter().enumerate() {
            if voxel.key != key {
                continue;
            }
            if voxel.live {
                return Lookup::Merged(SlotId(i as u32));
            }
            if reusable.is_none() {
                reusable = Some(SlotId(i as u32));
            }
        }
        match reusable {
            Some(slot) => Lookup::Reusable(slot),
            None => Lookup::Empty,
        }
    }

    /// Place a voxel of `color` at `key`.
    ///
    /// Placing over a live voxel only recolours it.
    pub fn place(&mut self, color: ColorIndex, key: StorageKey) -> PlaceOutcome {
        match self.lookup(key) {
            Lookup::Merged(slot) => {
                self.records[slot.index()].color = color;
                PlaceOutcome {
                    slot,
                    kind: Placement::Merged,
                }
            }
            Lookup::Reusable(slot) => {
                let voxel = &mut self.records[slot.index()];
                voxel.color = color;
                voxel.live = true;
                self.free_count -= 1;
                PlaceOutcome {
                    slot,
                    kind: Placement::Reused,
                }
            }
            Lookup::Empty => {
                let slot = SlotId(self.records.len() as u32);
                self.records.push(Voxel {
                    color,
                    key,
                    live: true,
                });
                PlaceOutcome {
                    slot,
                    kind: Placement::Created,
                }
            }
        }
    }

    /// Free the live voxel at `key`. Returns the freed slot, or None if the
    /// key holds no live voxel.
    pub fn remove_at(&mut self, key: StorageKey) -> Option<SlotId> {
        match self.lookup(key) {
            Lookup::Merged(slot) => {
                self.records[slot.index()].live = false;
                self.free_count += 1;
                Some(slot)
            }
            Lookup::Reusable(_) | Lookup::Empty => None,
        }
    }

    /// Discard the most recently appended record, whatever its state.
    ///
    /// This follows insertion order, not the last visible placement: a slot
    /// that was freed and reused in place is still undone by position.
    pub fn undo_last(&mut self) -> Option<Voxel> {
        let voxel = self.records.pop()?;
        if !voxel.live {
            self.free_count -= 1;
        }
        Some(voxel)
    }

    /// Discard every record.
    pub fn clear(&mut self) {
        self.records.clear();
        self.free_count = 0;
    }

    /// Live records in insertion order. Call again to restart.
    pub fn live_voxels(&self) -> impl Iterator<Item = &Voxel> + Clone + '_ {
        self.records.iter().filter(|v| v.live)
    }

    /// Live records with their slot ids, in insertion order.
    pub fn live_slots(&self) -> impl Iterator<Item = (SlotId, &Voxel)> + Clone + '_ {
        self.records
            .iter()
            .enumerate()
            .filter(|(_, v)| v.live)
            .map(|(i, v)| (SlotId(i as u32), v))
    }

    pub fn get(&self, slot: SlotId) -> Option<&Voxel> {
        self.records.get(slot.index())
    }

    /// All records, freed ones included.
    pub fn records(&self) -> &[Voxel] {
        &self.records
    }

    pub fn live_count(&self) -> usize {
        self.records.len() - self.free_count
    }

    pub fn free_count(&self) -> usize {
        self.free_count
    }

    pub fn total_count(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}
