//! Facility construction from type templates, plus layout helpers.

use tp_core::{GridPos, SimRng};

use crate::{DEFAULT_CAPACITY, DEFAULT_RUN_TIME, Facility, FacilityKind, FacilityResult, KindDefaults};

/// Random draws tried by [`random_free_position`] before falling back to a scan.
const MAX_RANDOM_ATTEMPTS: usize = 100;

/// Builds facilities from the [`FacilityKind`] defaults table.
pub struct FacilityFactory;

impl FacilityFactory {
    /// Create a facility of type `type_tag`.
    ///
    /// `capacity`/`run_time` override the kind's defaults.  For unknown tags
    /// the overrides are used directly, falling back to
    /// [`DEFAULT_CAPACITY`]/[`DEFAULT_RUN_TIME`] when absent.
    pub fn create(
        name:     impl Into<String>,
        type_tag: &str,
        capacity: Option<u32>,
        run_time: Option<u64>,
        pos:      GridPos,
    ) -> FacilityResult<Facility> {
        let (default_capacity, default_run_time) = match FacilityKind::from_tag(type_tag) {
            Some(kind) => {
                let d = kind.defaults();
                (d.capacity, d.run_time)
            }
            None => (DEFAULT_CAPACITY, DEFAULT_RUN_TIME),
        };
        Facility::new(
            name,
            type_tag,
            capacity.unwrap_or(default_capacity),
            run_time.unwrap_or(default_run_time),
            pos,
        )
    }

    /// Create a facility of a built-in kind with its default configuration.
    pub fn create_kind(
        name: impl Into<String>,
        kind: FacilityKind,
        pos:  GridPos,
    ) -> FacilityResult<Facility> {
        let d = kind.defaults();
        Facility::new(name, kind.tag(), d.capacity, d.run_time, pos)
    }

    /// Canonical tags of every built-in kind.
    pub fn available_types() -> Vec<&'static str> {
        FacilityKind::ALL.iter().map(|k| k.tag()).collect()
    }

    /// Defaults for `type_tag`, or `None` if it is not a built-in kind.
    pub fn type_info(type_tag: &str) -> Option<KindDefaults> {
        FacilityKind::from_tag(type_tag).map(FacilityKind::defaults)
    }
}

/// The starter park: one facility of each built-in kind.
pub fn default_facilities() -> FacilityResult<Vec<Facility>> {
    [
        ("Thunder Coaster", FacilityKind::RollerCoaster, GridPos::new(3, 3)),
        ("Sky Wheel",       FacilityKind::FerrisWheel,   GridPos::new(10, 3)),
        ("Merry-Go-Round",  FacilityKind::Carousel,      GridPos::new(3, 10)),
        ("Crash Derby",     FacilityKind::BumperCars,    GridPos::new(10, 10)),
        ("Black Pearl",     FacilityKind::PirateShip,    GridPos::new(6, 6)),
    ]
    .into_iter()
    .map(|(name, kind, pos)| FacilityFactory::create_kind(name, kind, pos))
    .collect()
}

/// Pick a cell on a `map_size × map_size` grid not listed in `occupied`.
///
/// Tries random cells first, then scans row-major for the first free one.
/// Returns the origin if the map is full.
pub fn random_free_position(map_size: u32, occupied: &[GridPos], rng: &mut SimRng) -> GridPos {
    let size = map_size.max(1) as i32;

    for _ in 0..MAX_RANDOM_ATTEMPTS {
        let pos = GridPos::new(rng.gen_range(0..size), rng.gen_range(0..size));
        if !occupied.contains(&pos) {
            return pos;
        }
    }

    (0..size)
        .flat_map(|x| (0..size).map(move |y| GridPos::new(x, y)))
        .find(|pos| !occupied.contains(pos))
        .unwrap_or(GridPos::ORIGIN)
}
