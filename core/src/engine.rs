use std::collections::{BTreeSet, VecDeque};

use chrono::prelude::*;
use ndarray::Array2;
use serde::{Deserialize, Serialize};

use crate::*;

/// Which condition ends the match with a win, chosen by the caller at
/// creation. The front-ends historically disagreed, so the engine supports
/// both explicitly.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum WinMode {
    /// Every non-mine cell has been revealed.
    RevealComplete,
    /// Flags exactly cover the mines, with no flags elsewhere.
    FlagComplete,
}

/// Valid transitions: `InProgress -> Won` and `InProgress -> Lost`. Terminal
/// states only change via a new game.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum Outcome {
    InProgress,
    Won,
    Lost,
}

impl Outcome {
    pub const fn is_terminal(self) -> bool {
        matches!(self, Self::Won | Self::Lost)
    }
}

impl Default for Outcome {
    fn default() -> Self {
        Self::InProgress
    }
}

/// Represents one match from creation to a terminal outcome. The hidden field
/// is generated lazily on the first effective reveal so a safe zone can be
/// carved around it.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Game {
    config: GameConfig,
    win_mode: WinMode,
    seed: u64,
    field: Option<MineField>,
    visibility: Array2<Visibility>,
    flags: BTreeSet<Coord2>,
    correct_flags: BTreeSet<Coord2>,
    revealed_count: CellCount,
    outcome: Outcome,
    triggered_mine: Option<Coord2>,
    started_at: Option<DateTime<Utc>>,
    ended_at: Option<DateTime<Utc>>,
}

impl Game {
    /// Starts a match with a random generation seed.
    pub fn new(config: GameConfig, win_mode: WinMode) -> Result<Self> {
        Self::with_seed(config, win_mode, rand::random())
    }

    /// Starts a match whose field generation is reproducible from `seed`.
    pub fn with_seed(config: GameConfig, win_mode: WinMode, seed: u64) -> Result<Self> {
        config.validate()?;
        Ok(Self {
            config,
            win_mode,
            seed,
            field: None,
            visibility: Array2::default(config.bounds().to_nd_index()),
            flags: BTreeSet::new(),
            correct_flags: BTreeSet::new(),
            revealed_count: 0,
            outcome: Outcome::default(),
            triggered_mine: None,
            started_at: None,
            ended_at: None,
        })
    }

    /// Wraps an already-built field, skipping lazy generation. The first-move
    /// safe zone does not apply since the layout is fixed; the config is not
    /// re-validated, which permits the tiny boards used in tests.
    pub fn from_field(field: MineField, win_mode: WinMode) -> Self {
        let config = GameConfig::new_unchecked(field.size(), field.mine_count());
        Self {
            config,
            win_mode,
            seed: 0,
            visibility: Array2::default(config.bounds().to_nd_index()),
            field: Some(field),
            flags: BTreeSet::new(),
            correct_flags: BTreeSet::new(),
            revealed_count: 0,
            outcome: Outcome::default(),
            triggered_mine: None,
            started_at: None,
            ended_at: None,
        }
    }

    pub fn outcome(&self) -> Outcome {
        self.outcome
    }

    pub fn win_mode(&self) -> WinMode {
        self.win_mode
    }

    pub fn size(&self) -> Coord {
        self.config.size
    }

    pub fn total_mines(&self) -> CellCount {
        self.config.mines
    }

    pub fn seed(&self) -> u64 {
        self.seed
    }

    /// True until the first effective reveal materializes the field.
    pub fn first_move_pending(&self) -> bool {
        self.field.is_none()
    }

    pub fn flag_count(&self) -> CellCount {
        self.flags.len() as CellCount
    }

    pub fn revealed_count(&self) -> CellCount {
        self.revealed_count
    }

    /// How many mines have not been flagged yet; negative when over-flagged.
    pub fn mines_left(&self) -> isize {
        (self.config.mines as isize) - (self.flags.len() as isize)
    }

    /// The mine the player stepped on, if the match was lost that way.
    pub fn triggered_mine(&self) -> Option<Coord2> {
        self.triggered_mine
    }

    pub fn cell_visibility(&self, coords: Coord2) -> Visibility {
        self.visibility[coords.to_nd_index()]
    }

    /// Content of a cell, exposed only once the cell is revealed or the match
    /// has ended. Front-ends render from this and never see hidden mines.
    pub fn visible_content(&self, coords: Coord2) -> Option<CellContent> {
        let field = self.field.as_ref()?;
        if self.visibility[coords.to_nd_index()].is_revealed() || self.outcome.is_terminal() {
            Some(field.content_at(coords))
        } else {
            None
        }
    }

    /// How many seconds have passed since the first reveal, 0 before it.
    pub fn elapsed_secs(&self) -> u32 {
        if let Some(started_at) = self.started_at {
            (self.ended_at.unwrap_or_else(Utc::now) - started_at)
                .num_seconds()
                .max(0) as u32
        } else {
            0
        }
    }

    /// Opens a cell. On the first effective reveal of the match this
    /// generates the field with a safe zone around `coords`.
    pub fn reveal(&mut self, coords: Coord2) -> Result<RevealOutcome> {
        let coords = self.validate_coords(coords)?;
        self.check_in_progress()?;

        // a flagged target never mutates anything, so it must not trigger
        // field generation either
        match self.visibility[coords.to_nd_index()] {
            Visibility::Revealed => return Ok(RevealOutcome::AlreadyOpen),
            Visibility::Flagged => return Ok(RevealOutcome::Flagged),
            Visibility::Hidden => {}
        }

        self.materialize_field(coords)?;
        let outcome = self.reveal_cell(coords);
        self.evaluate_win();
        Ok(outcome)
    }

    /// Flags or unflags a hidden cell. Revealed cells are ignored. There is
    /// no cap on simultaneous flags.
    pub fn toggle_flag(&mut self, coords: Coord2) -> Result<FlagOutcome> {
        let coords = self.validate_coords(coords)?;
        self.check_in_progress()?;

        let outcome = match self.visibility[coords.to_nd_index()] {
            Visibility::Revealed => FlagOutcome::Ignored,
            Visibility::Hidden => {
                self.visibility[coords.to_nd_index()] = Visibility::Flagged;
                self.flags.insert(coords);
                if self.is_mine(coords) {
                    self.correct_flags.insert(coords);
                }
                FlagOutcome::Added
            }
            Visibility::Flagged => {
                self.visibility[coords.to_nd_index()] = Visibility::Hidden;
                self.flags.remove(&coords);
                self.correct_flags.remove(&coords);
                FlagOutcome::Removed
            }
        };

        self.evaluate_win();
        Ok(outcome)
    }

    /// Opens every unflagged neighbor of a revealed numbered cell, provided
    /// the surrounding flag count matches its number.
    pub fn chord_open(&mut self, coords: Coord2) -> Result<ChordOutcome> {
        let coords = self.validate_coords(coords)?;
        self.check_in_progress()?;

        if !self.visibility[coords.to_nd_index()].is_revealed() {
            return Ok(ChordOutcome::NotNumbered);
        }
        let Some(expected) = self.content_at(coords).and_then(CellContent::number) else {
            return Ok(ChordOutcome::NotNumbered);
        };

        let actual = self.count_flagged_neighbors(coords);
        if actual != expected {
            return Ok(ChordOutcome::FlagMismatch { expected, actual });
        }

        let bounds = self.config.bounds();
        let mut merged = RevealOutcome::AlreadyOpen;
        for pos in neighbors(coords, bounds) {
            merged = merged | self.reveal_cell(pos);
            if matches!(merged, RevealOutcome::HitMine) {
                break;
            }
        }

        let outcome = match merged {
            RevealOutcome::HitMine => ChordOutcome::HitMine,
            RevealOutcome::Opened(count) => ChordOutcome::Opened(count),
            _ => ChordOutcome::Opened(0),
        };
        self.evaluate_win();
        Ok(outcome)
    }

    /// Opens one cell, cascading through empty regions. Assumes in-bounds
    /// coordinates and a live game.
    fn reveal_cell(&mut self, coords: Coord2) -> RevealOutcome {
        match self.visibility[coords.to_nd_index()] {
            Visibility::Revealed => return RevealOutcome::AlreadyOpen,
            Visibility::Flagged => return RevealOutcome::Flagged,
            Visibility::Hidden => {}
        }

        self.mark_started();

        if self.is_mine(coords) {
            log::debug!("mine hit at {:?}", coords);
            self.lose(coords);
            return RevealOutcome::HitMine;
        }

        RevealOutcome::Opened(self.flood_open(coords))
    }

    /// Iterative flood fill with an explicit work list; the visited set keeps
    /// the list bounded by the cell count.
    fn flood_open(&mut self, start: Coord2) -> CellCount {
        let bounds = self.config.bounds();
        let mut opened: CellCount = 0;
        let mut visited = BTreeSet::from([start]);
        let mut to_visit = VecDeque::from([start]);

        while let Some(coords) = to_visit.pop_front() {
            // flagged cells stay closed, revealed cells stop reprocessing
            if self.visibility[coords.to_nd_index()] != Visibility::Hidden {
                continue;
            }

            let content = self.content_at(coords).unwrap_or_default();
            self.visibility[coords.to_nd_index()] = Visibility::Revealed;
            self.revealed_count += 1;
            opened += 1;
            log::trace!("opened {:?}: {:?}", coords, content);

            // only empty cells continue the cascade; numbers border the
            // region and stop it
            if content == CellContent::Empty {
                for pos in neighbors(coords, bounds) {
                    if self.visibility[pos.to_nd_index()] == Visibility::Hidden
                        && visited.insert(pos)
                    {
                        to_visit.push_back(pos);
                    }
                }
            }
        }

        opened
    }

    fn lose(&mut self, triggered: Coord2) {
        self.outcome = Outcome::Lost;
        self.triggered_mine = Some(triggered);
        self.reveal_mines();
        self.mark_ended();
    }

    /// Loss side effect: every hidden mine becomes visible so the final board
    /// is fully inspectable. Flags are left as placed.
    fn reveal_mines(&mut self) {
        let Self {
            field, visibility, ..
        } = self;
        let Some(field) = field else { return };

        let (x_end, y_end) = field.bounds();
        for x in 0..x_end {
            for y in 0..y_end {
                let coords = (x, y);
                if field.is_mine(coords)
                    && visibility[coords.to_nd_index()] == Visibility::Hidden
                {
                    visibility[coords.to_nd_index()] = Visibility::Revealed;
                }
            }
        }
    }

    /// Consulted after every mutating action; a no-op once terminal.
    fn evaluate_win(&mut self) {
        if self.outcome.is_terminal() {
            return;
        }
        let Some(field) = &self.field else { return };

        let won = match self.win_mode {
            WinMode::RevealComplete => self.revealed_count == field.safe_cell_count(),
            WinMode::FlagComplete => {
                let mines = field.mine_count() as usize;
                self.flags.len() == mines && self.correct_flags.len() == mines
            }
        };

        if won {
            self.outcome = Outcome::Won;
            self.mark_ended();
        }
    }

    /// Generates the field on the first effective reveal, then reconciles the
    /// derived correct-flag set against the actual mine positions (flags may
    /// have been placed before generation).
    fn materialize_field(&mut self, safe: Coord2) -> Result<()> {
        if self.field.is_some() {
            return Ok(());
        }

        let field = RandomFieldGenerator::new(self.seed).generate(self.config, safe)?;
        self.correct_flags = self
            .flags
            .iter()
            .copied()
            .filter(|&coords| field.is_mine(coords))
            .collect();
        self.field = Some(field);
        log::debug!("field generated around safe cell {:?}", safe);
        Ok(())
    }

    fn mark_started(&mut self) {
        if self.started_at.is_none() {
            let now = Utc::now();
            log::debug!("started at {}", now);
            self.started_at = Some(now);
        }
    }

    fn mark_ended(&mut self) {
        let now = Utc::now();
        log::debug!("ended at {} with {:?}", now, self.outcome);
        self.ended_at = Some(now);
    }

    fn is_mine(&self, coords: Coord2) -> bool {
        self.field
            .as_ref()
            .is_some_and(|field| field.is_mine(coords))
    }

    fn content_at(&self, coords: Coord2) -> Option<CellContent> {
        self.field.as_ref().map(|field| field.content_at(coords))
    }

    fn count_flagged_neighbors(&self, coords: Coord2) -> u8 {
        neighbors(coords, self.config.bounds())
            .filter(|&pos| self.visibility[pos.to_nd_index()].is_flagged())
            .count() as u8
    }

    fn validate_coords(&self, coords: Coord2) -> Result<Coord2> {
        if coords.0 < self.config.size && coords.1 < self.config.size {
            Ok(coords)
        } else {
            Err(GameError::OutOfBounds)
        }
    }

    fn check_in_progress(&self) -> Result<()> {
        if self.outcome.is_terminal() {
            Err(GameError::GameOver)
        } else {
            Ok(())
        }
    }
}
