//! Fluent builder for constructing a [`Sim`].

use tp_core::{SimConfig, SimRng};
use tp_facility::{Facility, FacilityRecord, default_facilities};
use tp_queue::CommandStack;
use tp_visitor::VisitorGenerator;

use crate::{Park, Sim, SimError, SimResult};

/// Fluent builder for [`Sim`].
///
/// # Optional inputs (have defaults)
///
/// | Method                | Default                         |
/// |-----------------------|---------------------------------|
/// | `.facilities(v)`      | no facilities                   |
/// | `.layout(records)`    | no facilities                   |
/// | `.default_layout()`   | off                             |
/// | `.visitors(n)`        | 0 (spawn later with `spawn_visitors`) |
///
/// Facility sources are combined in the order: default layout, records,
/// explicit facilities.  Initial facilities are not undoable edits.
///
/// # Example
///
/// ```rust,ignore
/// let mut sim = SimBuilder::new(config)
///     .layout(&records)
///     .visitors(200)
///     .build()?;
/// sim.run(&mut NoopObserver);
/// ```
pub struct SimBuilder {
    config:         SimConfig,
    default_layout: bool,
    records:        Vec<FacilityRecord>,
    facilities:     Vec<Facility>,
    visitors:       usize,
}

impl SimBuilder {
    pub fn new(config: SimConfig) -> Self {
        Self {
            config,
            default_layout: false,
            records:        Vec::new(),
            facilities:     Vec::new(),
            visitors:       0,
        }
    }

    /// Start from the five-facility starter park.
    pub fn default_layout(mut self) -> Self {
        self.default_layout = true;
        self
    }

    /// Add facilities from persisted layout records.
    pub fn layout(mut self, records: &[FacilityRecord]) -> Self {
        self.records.extend_from_slice(records);
        self
    }

    pub fn facilities(mut self, facilities: Vec<Facility>) -> Self {
        self.facilities.extend(facilities);
        self
    }

    /// Spawn `count` visitors at the entry once the facilities are placed.
    pub fn visitors(mut self, count: usize) -> Self {
        self.visitors = count;
        self
    }

    /// Validate the configuration and every facility, then return a
    /// ready-to-run [`Sim`].
    pub fn build(self) -> SimResult<Sim> {
        self.config.validate()?;

        let mut initial = if self.default_layout {
            default_facilities()?
        } else {
            Vec::new()
        };
        for record in &self.records {
            initial.push(Facility::from_record(record)?);
        }
        initial.extend(self.facilities);

        let mut park = Park::new();
        for facility in initial {
            if park.id_of(facility.name()).is_some() {
                return Err(SimError::DuplicateFacility(facility.name().to_owned()));
            }
            let id = park.next_facility_id();
            park.insert_facility(id, facility.with_history_cap(self.config.history_cap));
        }

        let mut sim = Sim {
            clock:     self.config.make_clock(),
            rng:       SimRng::new(self.config.seed),
            commands:  CommandStack::new(self.config.undo_depth),
            generator: VisitorGenerator::new(),
            config:    self.config,
            park,
        };
        if self.visitors > 0 {
            sim.spawn_visitors(self.visitors);
        }
        Ok(sim)
    }
}
