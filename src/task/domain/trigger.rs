//! Calendar rules for recurring task triggers.

use super::{OwnerId, Recurrence, TaskTemplate};
use chrono::{DateTime, Datelike, NaiveDate, NaiveTime, Utc, Weekday};
use std::ops::RangeInclusive;

/// Days searched ahead when looking for the next firing.
///
/// Every rule produced from a [`Recurrence`] matches at least once in any
/// window of this size.
const SEARCH_HORIZON_DAYS: usize = 62;

/// Weekdays on which a `weekly` trigger fires.
pub const WEEKLY_FIRE_DAYS: [Weekday; 3] = [Weekday::Sun, Weekday::Tue, Weekday::Thu];

/// Month days on which a `monthly` trigger fires.
pub const MONTHLY_FIRE_DAYS: RangeInclusive<u32> = 1..=28;

/// Selects the calendar days a trigger is active on.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DayMatcher {
    /// Every calendar day.
    EveryDay,
    /// Only the listed weekdays.
    Weekdays(Vec<Weekday>),
    /// Only the listed days of the month.
    MonthDays(RangeInclusive<u32>),
}

impl DayMatcher {
    fn matches(&self, day: NaiveDate) -> bool {
        match self {
            Self::EveryDay => true,
            Self::Weekdays(weekdays) => weekdays.contains(&day.weekday()),
            Self::MonthDays(days) => days.contains(&day.day()),
        }
    }
}

/// Repeating trigger definition, evaluated in UTC.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TriggerRule {
    fire_at: NaiveTime,
    days: DayMatcher,
}

impl TriggerRule {
    /// Creates a rule firing at `fire_at` on every day selected by `days`.
    #[must_use]
    pub const fn new(fire_at: NaiveTime, days: DayMatcher) -> Self {
        Self { fire_at, days }
    }

    /// Builds the trigger for a recurrence keyword.
    ///
    /// `daily` fires at hour 0, `weekly` on Sunday, Tuesday and Thursday,
    /// and `monthly` on days 1 to 28. Rules that name no time of day fire at
    /// midnight.
    #[must_use]
    pub fn for_recurrence(recurrence: Recurrence) -> Self {
        let days = match recurrence {
            Recurrence::Daily => DayMatcher::EveryDay,
            Recurrence::Weekly => DayMatcher::Weekdays(WEEKLY_FIRE_DAYS.to_vec()),
            Recurrence::Monthly => DayMatcher::MonthDays(MONTHLY_FIRE_DAYS),
        };
        Self::new(NaiveTime::MIN, days)
    }

    /// Returns the time of day the rule fires at.
    #[must_use]
    pub const fn fire_at(&self) -> NaiveTime {
        self.fire_at
    }

    /// Returns the day selector.
    #[must_use]
    pub const fn days(&self) -> &DayMatcher {
        &self.days
    }

    /// Returns the first firing instant strictly after `after`.
    ///
    /// Returns `None` when the rule matches no day within the search
    /// horizon, which only happens for hand-built rules such as an empty
    /// weekday list.
    #[must_use]
    pub fn next_fire_after(&self, after: DateTime<Utc>) -> Option<DateTime<Utc>> {
        after
            .date_naive()
            .iter_days()
            .take(SEARCH_HORIZON_DAYS)
            .filter(|day| self.days.matches(*day))
            .map(|day| day.and_time(self.fire_at).and_utc())
            .find(|candidate| *candidate > after)
    }
}

impl From<Recurrence> for TriggerRule {
    fn from(recurrence: Recurrence) -> Self {
        Self::for_recurrence(recurrence)
    }
}

/// A recurring trigger together with the task data it materializes.
///
/// The template is a snapshot taken at creation time; later edits to the
/// originating task never reach it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TriggerRegistration {
    owner_id: OwnerId,
    rule: TriggerRule,
    template: TaskTemplate,
}

impl TriggerRegistration {
    /// Creates a registration for the given owner and template.
    #[must_use]
    pub const fn new(owner_id: OwnerId, rule: TriggerRule, template: TaskTemplate) -> Self {
        Self {
            owner_id,
            rule,
            template,
        }
    }

    /// Returns the owner of every task this trigger creates.
    #[must_use]
    pub const fn owner_id(&self) -> OwnerId {
        self.owner_id
    }

    /// Returns the calendar rule.
    #[must_use]
    pub const fn rule(&self) -> &TriggerRule {
        &self.rule
    }

    /// Returns the captured task template.
    #[must_use]
    pub const fn template(&self) -> &TaskTemplate {
        &self.template
    }
}
