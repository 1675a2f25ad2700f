mod grid;
mod nav;
mod util;
pub(crate) use self::grid::{Bounds, CalendarDay, MonthGrid, MonthGridBuilder, WeekRange, WeekRow};
pub(crate) use self::nav::{Anchors, NavigationPolicy, StepError};
pub(crate) use self::util::{week_key, weekday_abbrev, WeekStart};
