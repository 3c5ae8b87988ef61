//! Org sparse-tree window library.
//!
//! Keeps a movable date window, two filter-group cyclers (TODO states and
//! priority ranges) and a time-field selector, and compiles them into an Org
//! match string plus a set of calendar dates to highlight. The state is pure;
//! painting the calendar and filtering the document are delegated to the
//! collaborator traits in [`session`].

pub mod core {
    use serde::{Deserialize, Serialize};

    /// Which way a shift or a cycle moves.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
    #[serde(rename_all = "lowercase")]
    pub enum Direction {
        Forward,
        Backward,
    }

    impl Direction {
        pub fn sign(self) -> i64 {
            match self {
                Direction::Forward => 1,
                Direction::Backward => -1,
            }
        }
    }

    /// One boundary of the date window: `Left` is the earlier one.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
    #[serde(rename_all = "lowercase")]
    pub enum Flank {
        Left,
        Right,
    }

    /* ---------------------------- Errors (domain) ---------------------------- */

    #[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
    pub enum DomainError {
        #[error("invalid argument: {0}")]
        InvalidArgument(String),
        #[error("absolute day {0} is outside 0001-01-01..=9999-12-31")]
        DateOutOfRange(i64),
        #[error("the first filter group must be the \"no filter\" sentinel")]
        MissingNoFilterSentinel,
        #[error("filter group {0} is empty; only the first group may mean \"no filter\"")]
        InvalidGroups(usize),
        #[error("priority range {min}..={max} is inverted")]
        InvalidPriorityRange { min: i64, max: i64 },
    }

    /// Validates the day count of a shift command.
    pub fn checked_days(n: i64) -> Result<i64, DomainError> {
        if n < 1 {
            return Err(DomainError::InvalidArgument(format!(
                "shift amount must be a positive number of days, got {n}"
            )));
        }
        Ok(n)
    }
}

pub mod date {
    //! Absolute day numbers and their calendar presentation.
    //!
    //! Day 1 is 0001-01-01 of the proleptic Gregorian calendar, matching
    //! `chrono`'s `num_days_from_ce`. Supported range: 0001-01-01..=9999-12-31.

    use super::core::DomainError;
    use chrono::{Datelike, Local, Months, NaiveDate};
    use serde::{Deserialize, Serialize};
    use std::fmt;

    #[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
    #[serde(transparent)]
    pub struct AbsoluteDay(pub i64);

    /// Presentation-layer (year, month, day) triple.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
    pub struct CalendarDate {
        pub year: i32,
        pub month: u32,
        pub day: u32,
    }

    impl CalendarDate {
        pub fn new(year: i32, month: u32, day: u32) -> Self {
            Self { year, month, day }
        }
    }

    impl fmt::Display for CalendarDate {
        fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
            write!(f, "{:04}-{:02}-{:02}", self.year, self.month, self.day)
        }
    }

    impl AbsoluteDay {
        /// 0001-01-01.
        pub const MIN: AbsoluteDay = AbsoluteDay(1);
        /// 9999-12-31.
        pub const MAX: AbsoluteDay = AbsoluteDay(3_652_059);

        pub fn today() -> Self {
            Self::from_date(Local::now().date_naive())
        }

        pub fn from_date(date: NaiveDate) -> Self {
            Self(i64::from(date.num_days_from_ce()))
        }

        pub fn is_supported(self) -> bool {
            (Self::MIN..=Self::MAX).contains(&self)
        }

        pub fn to_date(self) -> Result<NaiveDate, DomainError> {
            if !self.is_supported() {
                return Err(DomainError::DateOutOfRange(self.0));
            }
            i32::try_from(self.0)
                .ok()
                .and_then(NaiveDate::from_num_days_from_ce_opt)
                .ok_or(DomainError::DateOutOfRange(self.0))
        }

        pub fn to_calendar_date(self) -> Result<CalendarDate, DomainError> {
            let date = self.to_date()?;
            Ok(CalendarDate::new(date.year(), date.month(), date.day()))
        }

        pub fn from_calendar_date(date: CalendarDate) -> Result<Self, DomainError> {
            let naive = NaiveDate::from_ymd_opt(date.year, date.month, date.day).ok_or_else(|| {
                DomainError::InvalidArgument(format!("{date} is not a calendar date"))
            })?;
            let day = Self::from_date(naive);
            if !day.is_supported() {
                return Err(DomainError::DateOutOfRange(day.0));
            }
            Ok(day)
        }

        /// Zero-padded `YYYY-MM-DD`, independent of locale.
        pub fn format_iso(self) -> Result<String, DomainError> {
            Ok(self.to_date()?.format("%Y-%m-%d").to_string())
        }

        /// Moves by `days`, failing instead of leaving the supported range.
        pub fn checked_offset(self, days: i64) -> Result<Self, DomainError> {
            let moved = self
                .0
                .checked_add(days)
                .map(Self)
                .ok_or(DomainError::DateOutOfRange(self.0))?;
            if !moved.is_supported() {
                return Err(DomainError::DateOutOfRange(moved.0));
            }
            Ok(moved)
        }

        /// Moves by `days`, stopping at the edges of the supported range.
        pub fn saturating_offset(self, days: i64) -> Self {
            Self(self.0.saturating_add(days)).clamp(Self::MIN, Self::MAX)
        }
    }

    /* --------------------------- Month arithmetic --------------------------- */

    /// First day of the month `months` before the month containing `reference`.
    pub fn first_day_of_month_before(
        reference: AbsoluteDay,
        months: u32,
    ) -> Result<AbsoluteDay, DomainError> {
        let first = reference
            .to_date()?
            .with_day(1)
            .and_then(|d| d.checked_sub_months(Months::new(months)));
        Ok(first
            .map(AbsoluteDay::from_date)
            .unwrap_or(AbsoluteDay::MIN)
            .max(AbsoluteDay::MIN))
    }

    /// Last day of the month `months` after the month containing `reference`.
    pub fn last_day_of_month_after(
        reference: AbsoluteDay,
        months: u32,
    ) -> Result<AbsoluteDay, DomainError> {
        let last = reference
            .to_date()?
            .with_day(1)
            .and_then(|d| d.checked_add_months(Months::new(months.saturating_add(1))))
            .and_then(|d| d.pred_opt());
        Ok(last
            .map(AbsoluteDay::from_date)
            .unwrap_or(AbsoluteDay::MAX)
            .min(AbsoluteDay::MAX))
    }

    pub fn first_day_of_previous_month(reference: AbsoluteDay) -> Result<AbsoluteDay, DomainError> {
        first_day_of_month_before(reference, 1)
    }

    pub fn last_day_of_next_month(reference: AbsoluteDay) -> Result<AbsoluteDay, DomainError> {
        last_day_of_month_after(reference, 1)
    }

    /// Dates the calendar shows; highlights outside it are dropped.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
    pub struct VisibleWindow {
        pub start: AbsoluteDay,
        pub end: AbsoluteDay,
    }

    impl VisibleWindow {
        pub fn around(
            reference: AbsoluteDay,
            months_before: u32,
            months_after: u32,
        ) -> Result<Self, DomainError> {
            Ok(Self {
                start: first_day_of_month_before(reference, months_before)?,
                end: last_day_of_month_after(reference, months_after)?,
            })
        }

        pub fn contains(&self, day: AbsoluteDay) -> bool {
            (self.start..=self.end).contains(&day)
        }

        /// Intersection of `[lo, hi]` with the window, if any.
        pub fn clip(&self, lo: AbsoluteDay, hi: AbsoluteDay) -> Option<(AbsoluteDay, AbsoluteDay)> {
            let lo = lo.max(self.start);
            let hi = hi.min(self.end);
            (lo <= hi).then_some((lo, hi))
        }
    }

    #[cfg(test)]
    mod tests {
        use super::*;

        fn day(y: i32, m: u32, d: u32) -> AbsoluteDay {
            AbsoluteDay::from_calendar_date(CalendarDate::new(y, m, d)).expect("valid date")
        }

        #[test]
        fn epoch_and_upper_limit_match_calendar() {
            assert_eq!(day(1, 1, 1), AbsoluteDay::MIN);
            assert_eq!(day(9999, 12, 31), AbsoluteDay::MAX);
        }

        #[test]
        fn rollover_dates_survive_conversion() {
            for (y, m, d) in [(2020, 12, 31), (2021, 1, 1), (2020, 2, 29), (2019, 3, 1)] {
                let abs = day(y, m, d);
                assert_eq!(abs.to_calendar_date().unwrap(), CalendarDate::new(y, m, d));
                assert_eq!(
                    abs.format_iso().unwrap(),
                    CalendarDate::new(y, m, d).to_string()
                );
            }
            assert_eq!(day(2020, 12, 31).0 + 1, day(2021, 1, 1).0);
        }

        #[test]
        fn iso_format_is_zero_padded() {
            assert_eq!(day(42, 3, 7).format_iso().unwrap(), "0042-03-07");
        }

        #[test]
        fn rejects_impossible_and_unsupported_dates() {
            assert!(matches!(
                AbsoluteDay::from_calendar_date(CalendarDate::new(2021, 2, 29)),
                Err(DomainError::InvalidArgument(_))
            ));
            assert_eq!(
                AbsoluteDay(0).format_iso(),
                Err(DomainError::DateOutOfRange(0))
            );
            assert!(AbsoluteDay::MAX.checked_offset(1).is_err());
            assert_eq!(AbsoluteDay::MIN.saturating_offset(-10), AbsoluteDay::MIN);
        }

        #[test]
        fn visible_window_spans_neighbouring_months() {
            let jan = day(2026, 1, 15);
            assert_eq!(first_day_of_previous_month(jan).unwrap(), day(2025, 12, 1));
            assert_eq!(last_day_of_next_month(jan).unwrap(), day(2026, 2, 28));

            let leap = day(2024, 1, 31);
            assert_eq!(last_day_of_next_month(leap).unwrap(), day(2024, 2, 29));

            let window = VisibleWindow::around(day(2026, 12, 10), 1, 1).unwrap();
            assert_eq!(window.start, day(2026, 11, 1));
            assert_eq!(window.end, day(2027, 1, 31));
            assert_eq!(window.clip(day(2026, 1, 1), day(2026, 11, 3)), Some((window.start, day(2026, 11, 3))));
            assert_eq!(window.clip(day(2028, 1, 1), day(2028, 1, 3)), None);
        }
    }
}

pub mod interval {
    //! The date window: two flanks, a midpoint and the from-midpoint selector.
    //!
    //! Invariants after [`Interval::normalize`]:
    //! - `left <= right`
    //! - `left <= midpoint <= right`
    //!
    //! Fallible mutators work on a copy and commit only after it normalizes;
    //! a rejected command leaves the interval untouched.

    use super::core::{Direction, DomainError, Flank, checked_days};
    use super::date::AbsoluteDay;
    use serde::{Deserialize, Serialize};
    use tracing::debug;

    pub const DEFAULT_HALF_WIDTH: i64 = 3;

    /// One-sided filtering relative to the midpoint.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
    #[serde(rename_all = "lowercase")]
    pub enum Side {
        Before,
        After,
    }

    /// `None` means range mode; otherwise the flanks are ignored (but kept).
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
    #[serde(rename_all = "lowercase")]
    pub enum Selector {
        #[default]
        None,
        Before,
        After,
    }

    impl From<Side> for Selector {
        fn from(side: Side) -> Self {
            match side {
                Side::Before => Selector::Before,
                Side::After => Selector::After,
            }
        }
    }

    /// A normalized view of the interval.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
    pub struct Bounds {
        pub left: AbsoluteDay,
        pub right: AbsoluteDay,
        pub midpoint: AbsoluteDay,
        pub selector: Selector,
    }

    impl Bounds {
        pub fn flank(&self, flank: Flank) -> AbsoluteDay {
            match flank {
                Flank::Left => self.left,
                Flank::Right => self.right,
            }
        }
    }

    #[derive(Debug, Clone, PartialEq, Eq)]
    pub struct Interval {
        left: Option<AbsoluteDay>,
        right: Option<AbsoluteDay>,
        midpoint: Option<AbsoluteDay>,
        selector: Selector,
        half_width: i64,
        /// Flank moved by the pending single-flank shift.
        anchor: Option<Flank>,
    }

    impl Default for Interval {
        fn default() -> Self {
            Self::new(DEFAULT_HALF_WIDTH)
        }
    }

    impl Interval {
        /// An uninitialized interval; the first `normalize` centres it on today.
        pub fn new(half_width: i64) -> Self {
            Self {
                left: None,
                right: None,
                midpoint: None,
                selector: Selector::None,
                half_width: half_width.max(0),
                anchor: None,
            }
        }

        /// Restores a previously held state; ordering is repaired on the next `normalize`.
        pub fn from_bounds(bounds: Bounds, half_width: i64) -> Self {
            Self {
                left: Some(bounds.left),
                right: Some(bounds.right),
                midpoint: Some(bounds.midpoint),
                selector: bounds.selector,
                ..Self::new(half_width)
            }
        }

        pub fn half_width(&self) -> i64 {
            self.half_width
        }

        pub fn selector(&self) -> Selector {
            self.selector
        }

        /// The current bounds, if the interval has been initialized.
        pub fn bounds(&self) -> Option<Bounds> {
            Some(Bounds {
                left: self.left?,
                right: self.right?,
                midpoint: self.midpoint?,
                selector: self.selector,
            })
        }

        /// Fills unset values around `today` and repairs ordering. Idempotent.
        ///
        /// When the flanks cross, the flank that was just moved keeps its value
        /// and the other one is placed next to it. A midpoint left outside the
        /// flanks snaps to the moved flank.
        pub fn normalize(&mut self, today: AbsoluteDay) -> Bounds {
            let mut midpoint = self.midpoint.unwrap_or(today);
            let mut left = self
                .left
                .unwrap_or_else(|| midpoint.saturating_offset(-self.half_width));
            let mut right = self
                .right
                .unwrap_or_else(|| midpoint.saturating_offset(self.half_width));

            if left > right {
                match self.anchor {
                    Some(Flank::Right) => left = right.saturating_offset(-1),
                    _ => right = left.saturating_offset(1),
                }
                debug!(left = left.0, right = right.0, "repaired crossed flanks");
            }

            if midpoint < left || midpoint > right {
                midpoint = match self.anchor {
                    Some(Flank::Left) => left,
                    Some(Flank::Right) => right,
                    None => midpoint.clamp(left, right),
                };
                debug!(midpoint = midpoint.0, "midpoint snapped into window");
            }

            self.left = Some(left);
            self.right = Some(right);
            self.midpoint = Some(midpoint);
            self.anchor = None;

            Bounds {
                left,
                right,
                midpoint,
                selector: self.selector,
            }
        }

        /// Moves both flanks and the midpoint; cancels from-midpoint mode.
        ///
        /// Returns whether the midpoint changed.
        pub fn shift_range(
            &mut self,
            today: AbsoluteDay,
            direction: Direction,
            n: i64,
        ) -> Result<bool, DomainError> {
            let delta = direction.sign() * checked_days(n)?;
            self.commit(today, |next, current| {
                next.left = Some(current.left.checked_offset(delta)?);
                next.right = Some(current.right.checked_offset(delta)?);
                next.midpoint = Some(current.midpoint.checked_offset(delta)?);
                next.selector = Selector::None;
                Ok(())
            })
        }

        /// Moves a single flank; the selector is left alone.
        pub fn shift_flank(
            &mut self,
            today: AbsoluteDay,
            flank: Flank,
            direction: Direction,
            n: i64,
        ) -> Result<bool, DomainError> {
            let delta = direction.sign() * checked_days(n)?;
            self.commit(today, |next, current| {
                let moved = Some(current.flank(flank).checked_offset(delta)?);
                match flank {
                    Flank::Left => next.left = moved,
                    Flank::Right => next.right = moved,
                }
                next.anchor = Some(flank);
                Ok(())
            })
        }

        pub fn shift_lower_bound(
            &mut self,
            today: AbsoluteDay,
            direction: Direction,
            n: i64,
        ) -> Result<bool, DomainError> {
            self.shift_flank(today, Flank::Left, direction, n)
        }

        pub fn shift_upper_bound(
            &mut self,
            today: AbsoluteDay,
            direction: Direction,
            n: i64,
        ) -> Result<bool, DomainError> {
            self.shift_flank(today, Flank::Right, direction, n)
        }

        /// Enters from-midpoint mode; the flanks are preserved for later.
        pub fn set_from_midpoint(&mut self, today: AbsoluteDay, side: Side) -> Bounds {
            self.selector = side.into();
            self.normalize(today)
        }

        pub fn clear_from_midpoint(&mut self, today: AbsoluteDay) -> Bounds {
            self.selector = Selector::None;
            self.normalize(today)
        }

        /// Forgets everything and re-centres on today.
        pub fn reset(&mut self, today: AbsoluteDay) -> Bounds {
            *self = Self::new(self.half_width);
            self.normalize(today)
        }

        fn commit(
            &mut self,
            today: AbsoluteDay,
            mutate: impl FnOnce(&mut Self, Bounds) -> Result<(), DomainError>,
        ) -> Result<bool, DomainError> {
            let mut next = self.clone();
            let current = next.normalize(today);
            mutate(&mut next, current)?;
            let updated = next.normalize(today);
            *self = next;
            Ok(updated.midpoint != current.midpoint)
        }
    }

    #[cfg(test)]
    mod tests {
        use super::*;

        const TODAY: AbsoluteDay = AbsoluteDay(739_000);

        fn at(left: i64, right: i64, midpoint: i64) -> Interval {
            Interval::from_bounds(
                Bounds {
                    left: AbsoluteDay(left),
                    right: AbsoluteDay(right),
                    midpoint: AbsoluteDay(midpoint),
                    selector: Selector::None,
                },
                DEFAULT_HALF_WIDTH,
            )
        }

        fn triple(bounds: Bounds) -> (i64, i64, i64) {
            (bounds.left.0, bounds.right.0, bounds.midpoint.0)
        }

        #[test]
        fn first_normalize_centres_on_today() {
            let mut interval = Interval::default();
            assert_eq!(interval.bounds(), None);
            let bounds = interval.normalize(TODAY);
            assert_eq!(triple(bounds), (TODAY.0 - 3, TODAY.0 + 3, TODAY.0));
            assert_eq!(interval.normalize(TODAY), bounds);
        }

        #[test]
        fn range_shift_round_trips() {
            let mut interval = at(100, 110, 105);
            let moved = interval.shift_range(TODAY, Direction::Forward, 4).unwrap();
            assert!(moved);
            assert_eq!(triple(interval.bounds().unwrap()), (104, 114, 109));
            interval.shift_range(TODAY, Direction::Backward, 4).unwrap();
            assert_eq!(triple(interval.bounds().unwrap()), (100, 110, 105));
        }

        #[test]
        fn week_shift_is_a_single_atomic_move() {
            let mut interval = at(100, 106, 103);
            interval.shift_range(TODAY, Direction::Forward, 7).unwrap();
            assert_eq!(triple(interval.bounds().unwrap()), (107, 113, 110));
        }

        #[test]
        fn range_shift_cancels_from_midpoint_mode() {
            let mut interval = at(100, 110, 105);
            interval.set_from_midpoint(TODAY, Side::After);
            interval.shift_range(TODAY, Direction::Backward, 1).unwrap();
            assert_eq!(interval.selector(), Selector::None);
        }

        #[test]
        fn upper_flank_dragged_past_lower_pulls_it_along() {
            let mut interval = at(10, 10, 10);
            let moved = interval
                .shift_upper_bound(TODAY, Direction::Backward, 5)
                .unwrap();
            let bounds = interval.bounds().unwrap();
            assert!(bounds.left <= bounds.right);
            assert_eq!(triple(bounds), (4, 5, 5));
            assert!(moved);
        }

        #[test]
        fn lower_flank_dragged_past_upper_pushes_it() {
            let mut interval = at(10, 12, 11);
            interval
                .shift_lower_bound(TODAY, Direction::Forward, 6)
                .unwrap();
            assert_eq!(triple(interval.bounds().unwrap()), (16, 17, 16));
        }

        #[test]
        fn flank_shift_inside_window_keeps_midpoint() {
            let mut interval = at(10, 20, 15);
            let moved = interval
                .shift_lower_bound(TODAY, Direction::Forward, 2)
                .unwrap();
            assert!(!moved);
            assert_eq!(triple(interval.bounds().unwrap()), (12, 20, 15));
        }

        #[test]
        fn flank_shift_preserves_selector() {
            let mut interval = at(10, 20, 15);
            interval.set_from_midpoint(TODAY, Side::Before);
            interval
                .shift_upper_bound(TODAY, Direction::Forward, 1)
                .unwrap();
            assert_eq!(interval.selector(), Selector::Before);
        }

        #[test]
        fn from_midpoint_mode_keeps_flanks() {
            let mut interval = at(10, 20, 15);
            let before = interval.set_from_midpoint(TODAY, Side::Before);
            assert_eq!(before.selector, Selector::Before);
            let restored = interval.clear_from_midpoint(TODAY);
            assert_eq!(triple(restored), (10, 20, 15));
            assert_eq!(restored.selector, Selector::None);
        }

        #[test]
        fn invalid_shift_leaves_state_untouched() {
            let mut interval = at(10, 20, 15);
            let snapshot = interval.clone();
            for n in [0, -3] {
                assert!(matches!(
                    interval.shift_range(TODAY, Direction::Forward, n),
                    Err(DomainError::InvalidArgument(_))
                ));
            }
            assert_eq!(interval, snapshot);

            let mut edge = at(1, 3, 2);
            let snapshot = edge.clone();
            assert!(matches!(
                edge.shift_range(TODAY, Direction::Backward, 1),
                Err(DomainError::DateOutOfRange(0))
            ));
            assert_eq!(edge, snapshot);
        }

        #[test]
        fn reset_recentres_on_today() {
            let mut interval = at(10, 20, 15);
            interval.set_from_midpoint(TODAY, Side::After);
            let bounds = interval.reset(TODAY);
            assert_eq!(triple(bounds), (TODAY.0 - 3, TODAY.0 + 3, TODAY.0));
            assert_eq!(bounds.selector, Selector::None);
        }

        #[test]
        fn normalize_repairs_restored_state() {
            let mut interval = at(30, 20, 40);
            let bounds = interval.normalize(TODAY);
            assert!(bounds.left <= bounds.right);
            assert!(bounds.left <= bounds.midpoint && bounds.midpoint <= bounds.right);
        }
    }
}

pub mod cycler {
    //! Wrap-around selection over a fixed list of filter presets.

    use super::core::{Direction, DomainError};
    use serde::{Deserialize, Serialize};

    /// A set of TODO keywords, kept in the order they were configured.
    #[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
    #[serde(transparent)]
    pub struct TodoGroup(pub Vec<String>);

    impl TodoGroup {
        pub fn new<I, S>(keywords: I) -> Self
        where
            I: IntoIterator<Item = S>,
            S: Into<String>,
        {
            Self(keywords.into_iter().map(Into::into).collect())
        }

        pub fn keywords(&self) -> &[String] {
            &self.0
        }
    }

    /// Inclusive priority range, in the numeric form Org uses (`A` = 65).
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
    pub struct PriorityRange {
        pub min: i64,
        pub max: i64,
    }

    impl PriorityRange {
        pub fn new(min: i64, max: i64) -> Result<Self, DomainError> {
            if min > max {
                return Err(DomainError::InvalidPriorityRange { min, max });
            }
            Ok(Self { min, max })
        }

        /// Range between two priority letters, e.g. `('A', 'C')`.
        pub fn letters(min: char, max: char) -> Result<Self, DomainError> {
            Self::new(i64::from(u32::from(min)), i64::from(u32::from(max)))
        }
    }

    /// Index into `groups`; slot 0 is always `None` ("no filter").
    #[derive(Debug, Clone, PartialEq, Eq)]
    pub struct FilterGroupCycler<T> {
        groups: Vec<Option<T>>,
        current: usize,
    }

    impl<T> FilterGroupCycler<T> {
        pub fn new(groups: Vec<Option<T>>) -> Result<Self, DomainError> {
            if !matches!(groups.first(), Some(None)) {
                return Err(DomainError::MissingNoFilterSentinel);
            }
            if let Some(pos) = groups.iter().skip(1).position(Option::is_none) {
                return Err(DomainError::InvalidGroups(pos + 1));
            }
            Ok(Self { groups, current: 0 })
        }

        /// Builds a cycler from presets, prepending the "no filter" slot.
        pub fn with_presets(presets: impl IntoIterator<Item = T>) -> Self {
            let groups = std::iter::once(None)
                .chain(presets.into_iter().map(Some))
                .collect();
            Self { groups, current: 0 }
        }

        pub fn current(&self) -> Option<&T> {
            self.groups.get(self.current).and_then(Option::as_ref)
        }

        pub fn index(&self) -> usize {
            self.current
        }

        pub fn len(&self) -> usize {
            self.groups.len()
        }

        pub fn is_empty(&self) -> bool {
            self.groups.len() <= 1
        }

        pub fn next_group(&mut self) -> Option<&T> {
            self.cycle(Direction::Forward)
        }

        pub fn previous_group(&mut self) -> Option<&T> {
            self.cycle(Direction::Backward)
        }

        pub fn cycle(&mut self, direction: Direction) -> Option<&T> {
            let len = self.groups.len();
            self.current = match direction {
                Direction::Forward => (self.current + 1) % len,
                Direction::Backward => (self.current + len - 1) % len,
            };
            self.current()
        }

        /// Back to "no filter".
        pub fn reset(&mut self) {
            self.current = 0;
        }
    }

    #[cfg(test)]
    mod tests {
        use super::*;

        fn todo_cycler() -> FilterGroupCycler<TodoGroup> {
            FilterGroupCycler::new(vec![
                None,
                Some(TodoGroup::new(["DONE"])),
                Some(TodoGroup::new(["TODO", "DOING"])),
            ])
            .unwrap()
        }

        #[test]
        fn starts_without_filter() {
            assert_eq!(todo_cycler().current(), None);
        }

        #[test]
        fn forward_wraps_after_full_lap() {
            let mut cycler = todo_cycler();
            cycler.next_group();
            let start = cycler.current().cloned();
            for _ in 0..cycler.len() {
                cycler.next_group();
            }
            assert_eq!(cycler.current().cloned(), start);
        }

        #[test]
        fn backward_from_sentinel_lands_on_last() {
            let mut cycler = todo_cycler();
            assert_eq!(
                cycler.previous_group(),
                Some(&TodoGroup::new(["TODO", "DOING"]))
            );
            cycler.next_group();
            assert_eq!(cycler.index(), 0);
        }

        #[test]
        fn sentinel_is_required_first_and_only_first() {
            assert_eq!(
                FilterGroupCycler::new(vec![Some(PriorityRange::new(65, 66).unwrap())]),
                Err(DomainError::MissingNoFilterSentinel)
            );
            assert_eq!(
                FilterGroupCycler::<PriorityRange>::new(vec![]),
                Err(DomainError::MissingNoFilterSentinel)
            );
            assert_eq!(
                FilterGroupCycler::new(vec![None, Some(TodoGroup::new(["A"])), None]),
                Err(DomainError::InvalidGroups(2))
            );
        }

        #[test]
        fn sentinel_only_cycler_stays_put() {
            let mut cycler = FilterGroupCycler::<PriorityRange>::with_presets([]);
            assert!(cycler.is_empty());
            assert_eq!(cycler.next_group(), None);
            assert_eq!(cycler.index(), 0);
        }

        #[test]
        fn priority_letters_map_to_codes() {
            assert_eq!(
                PriorityRange::letters('A', 'D').unwrap(),
                PriorityRange { min: 65, max: 68 }
            );
            assert!(PriorityRange::new(68, 65).is_err());
        }
    }
}

pub mod time_mode {
    //! Which timestamp field of an entry the date window applies to.

    use serde::{Deserialize, Serialize};

    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
    #[serde(rename_all = "lowercase")]
    pub enum TimeMode {
        #[default]
        None,
        Timestamp,
        Scheduled,
        Deadline,
    }

    impl TimeMode {
        pub const CYCLE: [TimeMode; 4] = [
            TimeMode::None,
            TimeMode::Timestamp,
            TimeMode::Scheduled,
            TimeMode::Deadline,
        ];

        /// Match-string property name; `None` disables time filtering.
        pub fn field(self) -> Option<&'static str> {
            match self {
                TimeMode::None => None,
                TimeMode::Timestamp => Some("TIMESTAMP"),
                TimeMode::Scheduled => Some("SCHEDULED"),
                TimeMode::Deadline => Some("DEADLINE"),
            }
        }

        fn position(self) -> usize {
            Self::CYCLE.iter().position(|m| *m == self).unwrap_or(0)
        }
    }

    #[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
    pub struct TimeModeSelector {
        mode: TimeMode,
    }

    impl TimeModeSelector {
        pub fn new(mode: TimeMode) -> Self {
            Self { mode }
        }

        pub fn mode(&self) -> TimeMode {
            self.mode
        }

        pub fn next_mode(&mut self) -> TimeMode {
            let idx = (self.mode.position() + 1) % TimeMode::CYCLE.len();
            self.mode = TimeMode::CYCLE[idx];
            self.mode
        }

        pub fn previous_mode(&mut self) -> TimeMode {
            let len = TimeMode::CYCLE.len();
            let idx = (self.mode.position() + len - 1) % len;
            self.mode = TimeMode::CYCLE[idx];
            self.mode
        }
    }

}

pub mod query {
    //! Compiles the window state into an Org match string and highlight set.
    //!
    //! Grammar of the produced text: `CLAUSE ('&' CLAUSE)*`, clauses in the
    //! order date, TODO, priority. Dates are written as `"<YYYY-MM-DD>"` and
    //! TODO alternatives are separated by a literal `\|`.

    use super::core::DomainError;
    use super::cycler::{FilterGroupCycler, PriorityRange, TodoGroup};
    use super::date::{AbsoluteDay, VisibleWindow};
    use super::interval::{Bounds, Selector};
    use super::time_mode::TimeMode;
    use serde::{Deserialize, Serialize};

    const TODO_SEPARATOR: &str = "\\|";

    #[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
    pub struct Highlight {
        pub day: AbsoluteDay,
        pub is_midpoint: bool,
    }

    #[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
    pub struct CompiledQuery {
        /// `None` when no clause is active; such a query must not be applied.
        pub text: Option<String>,
        pub highlights: Vec<Highlight>,
    }

    impl CompiledQuery {
        pub fn text(&self) -> Option<&str> {
            self.text.as_deref()
        }

        pub fn midpoint(&self) -> Option<AbsoluteDay> {
            self.highlights.iter().find(|h| h.is_midpoint).map(|h| h.day)
        }
    }

    pub fn compile(
        bounds: &Bounds,
        todo: &FilterGroupCycler<TodoGroup>,
        priority: &FilterGroupCycler<PriorityRange>,
        mode: TimeMode,
        window: &VisibleWindow,
    ) -> Result<CompiledQuery, DomainError> {
        let clauses: Vec<String> = [
            date_clause(bounds, mode)?,
            todo.current().map(todo_clause),
            priority.current().map(priority_clause),
        ]
        .into_iter()
        .flatten()
        .collect();

        Ok(CompiledQuery {
            text: (!clauses.is_empty()).then(|| clauses.join("&")),
            highlights: highlight_set(bounds, mode, window),
        })
    }

    pub fn date_clause(bounds: &Bounds, mode: TimeMode) -> Result<Option<String>, DomainError> {
        let Some(field) = mode.field() else {
            return Ok(None);
        };
        let clause = match bounds.selector {
            Selector::Before => format!("{field}<=\"<{}>\"", bounds.midpoint.format_iso()?),
            Selector::After => format!("{field}>=\"<{}>\"", bounds.midpoint.format_iso()?),
            Selector::None => format!(
                "{field}>=\"<{}>\"&{field}<=\"<{}>\"",
                bounds.left.format_iso()?,
                bounds.right.format_iso()?
            ),
        };
        Ok(Some(clause))
    }

    pub fn todo_clause(group: &TodoGroup) -> String {
        format!("TODO={{{}}}", group.keywords().join(TODO_SEPARATOR))
    }

    pub fn priority_clause(range: &PriorityRange) -> String {
        format!("PRIORITY>={}&PRIORITY<={}", range.min, range.max)
    }

    /// Dates to mark on the calendar, clipped to `window`.
    pub fn highlight_set(bounds: &Bounds, mode: TimeMode, window: &VisibleWindow) -> Vec<Highlight> {
        if mode == TimeMode::None {
            return vec![];
        }
        let span = match bounds.selector {
            Selector::None => window.clip(bounds.left, bounds.right),
            Selector::Before => window.clip(window.start, bounds.midpoint),
            Selector::After => window.clip(bounds.midpoint, window.end),
        };
        let Some((lo, hi)) = span else {
            return vec![];
        };
        (lo.0..=hi.0)
            .map(|d| Highlight {
                day: AbsoluteDay(d),
                is_midpoint: d == bounds.midpoint.0,
            })
            .collect()
    }

}

pub mod config {
    //! Session configuration, loadable from TOML.
    //!
    //! ```toml
    //! todo_groups = [["DONE"], ["TODO", "DOING"]]
    //! priority_groups = [{ min = 65, max = 68 }]
    //! half_width = 3
    //! auto_apply = true
    //! time_mode = "timestamp"
    //! ```

    use super::core::DomainError;
    use super::cycler::{FilterGroupCycler, PriorityRange, TodoGroup};
    use super::interval::DEFAULT_HALF_WIDTH;
    use super::time_mode::TimeMode;
    use anyhow::{Context, Result};
    use serde::{Deserialize, Serialize};
    use std::{fs, path::Path};

    #[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
    #[serde(default, deny_unknown_fields)]
    pub struct WindowConfig {
        /// TODO presets, without the leading "no filter" slot.
        pub todo_groups: Vec<TodoGroup>,
        /// Priority presets, without the leading "no filter" slot.
        pub priority_groups: Vec<PriorityRange>,
        /// Days on each side of today for a fresh window.
        pub half_width: i64,
        /// Months shown before/after today's month on the calendar.
        pub months_before: u32,
        pub months_after: u32,
        /// Apply the query to the document after every command.
        pub auto_apply: bool,
        pub time_mode: TimeMode,
    }

    impl Default for WindowConfig {
        fn default() -> Self {
            Self {
                todo_groups: vec![
                    TodoGroup::new(["TODO", "NEXT"]),
                    TodoGroup::new(["WAITING"]),
                    TodoGroup::new(["DONE", "CANCELLED"]),
                ],
                priority_groups: vec![
                    PriorityRange { min: 65, max: 65 },
                    PriorityRange { min: 65, max: 66 },
                    PriorityRange { min: 65, max: 67 },
                ],
                half_width: DEFAULT_HALF_WIDTH,
                months_before: 1,
                months_after: 1,
                auto_apply: true,
                time_mode: TimeMode::None,
            }
        }
    }

    impl WindowConfig {
        pub fn load(path: &Path) -> Result<Self> {
            let text = fs::read_to_string(path)
                .with_context(|| format!("reading config {:?}", path))?;
            Self::from_toml_str(&text).with_context(|| format!("loading config {:?}", path))
        }

        pub fn from_toml_str(text: &str) -> Result<Self> {
            let config: Self = toml::from_str(text).context("parsing window config")?;
            config.validate()?;
            Ok(config)
        }

        pub fn validate(&self) -> Result<(), DomainError> {
            if self.half_width < 0 {
                return Err(DomainError::InvalidArgument(format!(
                    "half_width must not be negative, got {}",
                    self.half_width
                )));
            }
            if let Some(pos) = self.todo_groups.iter().position(|g| g.keywords().is_empty()) {
                return Err(DomainError::InvalidGroups(pos + 1));
            }
            for range in &self.priority_groups {
                PriorityRange::new(range.min, range.max)?;
            }
            Ok(())
        }

        pub fn todo_cycler(&self) -> FilterGroupCycler<TodoGroup> {
            FilterGroupCycler::with_presets(self.todo_groups.iter().cloned())
        }

        pub fn priority_cycler(&self) -> FilterGroupCycler<PriorityRange> {
            FilterGroupCycler::with_presets(self.priority_groups.iter().copied())
        }
    }

}

pub mod session {
    //! Command-at-a-time orchestration of the window state.
    //!
    //! [`Session::apply`] mutates and normalizes; [`Session::sync`] compiles and
    //! dispatches to the collaborators. [`Session::execute`] does both. Batched
    //! commands call `apply` repeatedly and `sync` once.

    use super::config::WindowConfig;
    use super::core::{Direction, DomainError, Flank, checked_days};
    use super::cycler::{FilterGroupCycler, PriorityRange, TodoGroup};
    use super::date::{AbsoluteDay, VisibleWindow};
    use super::interval::{Bounds, Interval, Side};
    use super::query::{self, CompiledQuery, Highlight};
    use super::time_mode::{TimeMode, TimeModeSelector};
    use serde::Serialize;
    use std::str::FromStr;
    use tracing::{debug, info, warn};

    pub const DAYS_PER_WEEK: i64 = 7;

    /* ----------------------------- Collaborators ----------------------------- */

    /// The calendar view the window is drawn on.
    pub trait CalendarDisplay {
        fn today(&self) -> AbsoluteDay;

        fn paint(&mut self, highlights: &[Highlight]) -> Result<(), CollaboratorError>;

        /// Moves the calendar cursor after the midpoint changed.
        fn focus(&mut self, _day: AbsoluteDay) -> Result<(), CollaboratorError> {
            Ok(())
        }
    }

    /// Reveals the document sections matching a query.
    pub trait DocumentFilter {
        fn apply(&mut self, query: &str) -> Result<(), CollaboratorError>;
    }

    #[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
    pub enum CollaboratorError {
        #[error("calendar display failed: {0}")]
        Calendar(String),
        #[error("document filter failed: {0}")]
        Document(String),
    }

    #[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
    pub enum SessionError {
        #[error(transparent)]
        Domain(#[from] DomainError),
        #[error(transparent)]
        Collaborator(#[from] CollaboratorError),
    }

    /* -------------------------------- Commands -------------------------------- */

    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    pub enum Command {
        Reset,
        ShiftRange { direction: Direction, days: i64 },
        ShiftWeek(Direction),
        ShiftFlank { flank: Flank, direction: Direction, days: i64 },
        FromMidpoint(Side),
        StopFromMidpoint,
        CycleTodo(Direction),
        CyclePriority(Direction),
        CycleTimeMode(Direction),
        ToggleAutoApply,
        /// Push the current query to the document regardless of auto-apply.
        ApplyQuery,
    }

    /// Names accepted by `Command::from_str`. Shift commands marked `[:N]`
    /// take an optional day count.
    pub const COMMAND_NAMES: &[&str] = &[
        "reset",
        "shift-range-forward[:N]",
        "shift-range-backward[:N]",
        "shift-week-forward",
        "shift-week-backward",
        "shift-lower-forward[:N]",
        "shift-lower-backward[:N]",
        "shift-upper-forward[:N]",
        "shift-upper-backward[:N]",
        "from-midpoint-before",
        "from-midpoint-after",
        "stop-from-midpoint",
        "cycle-todo-forward",
        "cycle-todo-backward",
        "cycle-priority-forward",
        "cycle-priority-backward",
        "cycle-time-mode-forward",
        "cycle-time-mode-backward",
        "toggle-auto-apply",
        "apply",
    ];

    impl FromStr for Command {
        type Err = DomainError;

        fn from_str(s: &str) -> Result<Self, Self::Err> {
            let s = s.trim();
            let (name, count) = match s.split_once(':') {
                Some((name, count)) => (name, Some(count)),
                None => (s, None),
            };
            let days = match count {
                Some(raw) => checked_days(raw.trim().parse::<i64>().map_err(|_| {
                    DomainError::InvalidArgument(format!("day count {raw:?} is not an integer"))
                })?)?,
                None => 1,
            };

            use Direction::{Backward, Forward};
            let shift = |flank: Option<Flank>, direction: Direction| match flank {
                None => Command::ShiftRange { direction, days },
                Some(flank) => Command::ShiftFlank {
                    flank,
                    direction,
                    days,
                },
            };
            let command = match name {
                "shift-range-forward" => shift(None, Forward),
                "shift-range-backward" => shift(None, Backward),
                "shift-lower-forward" => shift(Some(Flank::Left), Forward),
                "shift-lower-backward" => shift(Some(Flank::Left), Backward),
                "shift-upper-forward" => shift(Some(Flank::Right), Forward),
                "shift-upper-backward" => shift(Some(Flank::Right), Backward),
                _ if count.is_some() => {
                    return Err(DomainError::InvalidArgument(format!(
                        "command {name:?} does not take a day count"
                    )));
                }
                "reset" => Command::Reset,
                "shift-week-forward" => Command::ShiftWeek(Forward),
                "shift-week-backward" => Command::ShiftWeek(Backward),
                "from-midpoint-before" => Command::FromMidpoint(Side::Before),
                "from-midpoint-after" => Command::FromMidpoint(Side::After),
                "stop-from-midpoint" => Command::StopFromMidpoint,
                "cycle-todo-forward" => Command::CycleTodo(Forward),
                "cycle-todo-backward" => Command::CycleTodo(Backward),
                "cycle-priority-forward" => Command::CyclePriority(Forward),
                "cycle-priority-backward" => Command::CyclePriority(Backward),
                "cycle-time-mode-forward" => Command::CycleTimeMode(Forward),
                "cycle-time-mode-backward" => Command::CycleTimeMode(Backward),
                "toggle-auto-apply" => Command::ToggleAutoApply,
                "apply" => Command::ApplyQuery,
                other => {
                    return Err(DomainError::InvalidArgument(format!(
                        "unknown command {other:?}"
                    )));
                }
            };
            Ok(command)
        }
    }

    /* --------------------------------- Session --------------------------------- */

    /// Host-visible summary of the session state.
    #[derive(Debug, Clone, PartialEq, Eq, Serialize)]
    pub struct SessionSnapshot {
        pub bounds: Option<Bounds>,
        pub todo_group: Option<TodoGroup>,
        pub priority_range: Option<PriorityRange>,
        pub time_mode: TimeMode,
        pub auto_apply: bool,
    }

    /// One window/filter session, owning its two collaborators.
    pub struct Session<C, D> {
        interval: Interval,
        todo: FilterGroupCycler<TodoGroup>,
        priority: FilterGroupCycler<PriorityRange>,
        time_mode: TimeModeSelector,
        auto_apply: bool,
        months_before: u32,
        months_after: u32,
        focus_pending: bool,
        last_query: Option<CompiledQuery>,
        calendar: C,
        document: D,
    }

    impl<C: CalendarDisplay, D: DocumentFilter> Session<C, D> {
        pub fn new(config: &WindowConfig, calendar: C, document: D) -> Self {
            Self {
                interval: Interval::new(config.half_width),
                todo: config.todo_cycler(),
                priority: config.priority_cycler(),
                time_mode: TimeModeSelector::new(config.time_mode),
                auto_apply: config.auto_apply,
                months_before: config.months_before,
                months_after: config.months_after,
                focus_pending: false,
                last_query: None,
                calendar,
                document,
            }
        }

        /// Mutates and normalizes without compiling or dispatching.
        ///
        /// Returns whether the midpoint moved. On error the state is unchanged.
        pub fn apply(&mut self, command: Command) -> Result<bool, DomainError> {
            let today = self.calendar.today();
            let before = self.interval.bounds().map(|b| b.midpoint);
            match command {
                Command::Reset => {
                    self.interval.reset(today);
                }
                Command::ShiftRange { direction, days } => {
                    self.interval.shift_range(today, direction, days)?;
                }
                Command::ShiftWeek(direction) => {
                    self.interval.shift_range(today, direction, DAYS_PER_WEEK)?;
                }
                Command::ShiftFlank {
                    flank,
                    direction,
                    days,
                } => {
                    self.interval.shift_flank(today, flank, direction, days)?;
                }
                Command::FromMidpoint(side) => {
                    self.interval.set_from_midpoint(today, side);
                }
                Command::StopFromMidpoint => {
                    self.interval.clear_from_midpoint(today);
                }
                Command::CycleTodo(direction) => {
                    self.todo.cycle(direction);
                }
                Command::CyclePriority(direction) => {
                    self.priority.cycle(direction);
                }
                Command::CycleTimeMode(Direction::Forward) => {
                    self.time_mode.next_mode();
                }
                Command::CycleTimeMode(Direction::Backward) => {
                    self.time_mode.previous_mode();
                }
                Command::ToggleAutoApply => {
                    self.auto_apply = !self.auto_apply;
                }
                Command::ApplyQuery => {}
            }
            let after = self.interval.normalize(today).midpoint;
            let moved = before != Some(after);
            self.focus_pending |= moved;
            debug!(?command, midpoint = after.0, moved, "applied command");
            Ok(moved)
        }

        /// Compiles the current state and dispatches it. The document filter
        /// only receives the query when auto-apply is on.
        pub fn sync(&mut self) -> Result<CompiledQuery, SessionError> {
            self.dispatch(self.auto_apply)
        }

        /// Like `sync`, but always offers the query to the document filter.
        pub fn force_apply(&mut self) -> Result<CompiledQuery, SessionError> {
            self.dispatch(true)
        }

        pub fn execute(&mut self, command: Command) -> Result<CompiledQuery, SessionError> {
            self.apply(command)?;
            match command {
                Command::ApplyQuery => self.force_apply(),
                _ => self.sync(),
            }
        }

        /// Normalizes and compiles without touching the collaborators.
        pub fn compile(&mut self) -> Result<CompiledQuery, DomainError> {
            let (bounds, window) = self.prepare()?;
            query::compile(
                &bounds,
                &self.todo,
                &self.priority,
                self.time_mode.mode(),
                &window,
            )
        }

        fn prepare(&mut self) -> Result<(Bounds, VisibleWindow), DomainError> {
            let today = self.calendar.today();
            let bounds = self.interval.normalize(today);
            let window = VisibleWindow::around(today, self.months_before, self.months_after)?;
            Ok((bounds, window))
        }

        fn dispatch(&mut self, to_document: bool) -> Result<CompiledQuery, SessionError> {
            let compiled = self.compile()?;
            self.last_query = Some(compiled.clone());

            let focused = if self.focus_pending {
                let midpoint = self.interval.normalize(self.calendar.today()).midpoint;
                let result = self.calendar.focus(midpoint);
                self.focus_pending = result.is_err();
                result
            } else {
                Ok(())
            };
            let painted = self.calendar.paint(&compiled.highlights);
            let applied = match compiled.text() {
                Some(text) if to_document => {
                    info!(query = text, "applying query to document");
                    self.document.apply(text)
                }
                None if to_document => {
                    warn!("no active clauses; document filter skipped");
                    Ok(())
                }
                _ => Ok(()),
            };

            for result in [focused, painted, applied] {
                if let Err(err) = result {
                    warn!(error = %err, "collaborator dispatch failed");
                    return Err(err.into());
                }
            }
            Ok(compiled)
        }

        pub fn snapshot(&self) -> SessionSnapshot {
            SessionSnapshot {
                bounds: self.interval.bounds(),
                todo_group: self.todo.current().cloned(),
                priority_range: self.priority.current().copied(),
                time_mode: self.time_mode.mode(),
                auto_apply: self.auto_apply,
            }
        }

        pub fn interval(&self) -> &Interval {
            &self.interval
        }

        pub fn todo(&self) -> &FilterGroupCycler<TodoGroup> {
            &self.todo
        }

        pub fn priority(&self) -> &FilterGroupCycler<PriorityRange> {
            &self.priority
        }

        pub fn time_mode(&self) -> TimeMode {
            self.time_mode.mode()
        }

        pub fn auto_apply(&self) -> bool {
            self.auto_apply
        }

        /// The query produced by the most recent dispatch.
        pub fn last_query(&self) -> Option<&CompiledQuery> {
            self.last_query.as_ref()
        }

        pub fn calendar(&self) -> &C {
            &self.calendar
        }

        pub fn calendar_mut(&mut self) -> &mut C {
            &mut self.calendar
        }

        pub fn document(&self) -> &D {
            &self.document
        }

        pub fn into_parts(self) -> (C, D) {
            (self.calendar, self.document)
        }
    }

}

pub use config::WindowConfig;
pub use query::{CompiledQuery, compile};
pub use session::{CalendarDisplay, Command, DocumentFilter, Session};
