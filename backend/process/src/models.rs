use catalog::weeks::MenuWeek;
use chrono::NaiveDate;

#[derive(Debug, Default)]
pub struct AuditReport {
    pub days_checked: usize,
    pub weeks_covered: Vec<MenuWeek>,
    pub missing_weeks: Vec<MenuWeek>,
    pub duplicate_dishes: Vec<(NaiveDate, String)>,
    pub untagged_dishes: usize,
}

impl AuditReport {
    pub fn is_clean(&self) -> bool {
        self.missing_weeks.is_empty() && self.duplicate_dishes.is_empty()
    }
}
