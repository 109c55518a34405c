//! Terminal output. Every `render_*` function returns the text so tests can check
//! it; the handlers print it.

use chrono::{DateTime, Utc};
use classbookapp::aggregate::{LetterGrade, MonthCalendar, StudentReport};
use classbookapp::api::{
    AttendanceWeek, ClassReport, Dashboard, GradeCell, GradeMatrix, StudentRow,
};
use classbookapp::commands::{CmdMessage, MessageLevel};
use classbookapp::config::{ClassbookConfig, KEYS};
use classbookapp::model::{Assignment, AttendanceStatus, Category, Student};
use colored::{ColoredString, Colorize};
use std::fmt::Write;
use timeago::Formatter;
use unicode_width::{UnicodeWidthChar, UnicodeWidthStr};

const NAME_WIDTH: usize = 24;
const EMAIL_WIDTH: usize = 28;
const TITLE_WIDTH: usize = 30;

pub fn print_messages(messages: &[CmdMessage]) {
    for message in messages {
        match message.level {
            MessageLevel::Info => println!("{}", message.content.dimmed()),
            MessageLevel::Success => println!("{}", message.content.green()),
            MessageLevel::Warning => println!("{}", message.content.yellow()),
            MessageLevel::Error => println!("{}", message.content.red()),
        }
    }
}

fn truncate_to_width(s: &str, max_width: usize) -> String {
    if s.width() <= max_width {
        return s.to_string();
    }
    let mut result = String::new();
    let mut current_width = 0;
    for c in s.chars() {
        let char_width = c.width().unwrap_or(0);
        if current_width + char_width > max_width.saturating_sub(1) {
            result.push('…');
            return result;
        }
        result.push(c);
        current_width += char_width;
    }
    result
}

/// Truncate or pad to exactly `width` display columns.
fn cell(s: &str, width: usize) -> String {
    let shown = truncate_to_width(s, width);
    let padding = width.saturating_sub(shown.width());
    format!("{}{}", shown, " ".repeat(padding))
}

fn letter_colored(letter: LetterGrade) -> ColoredString {
    let text = letter.to_string();
    match letter {
        LetterGrade::A => text.green(),
        LetterGrade::B => text.cyan(),
        LetterGrade::C => text.yellow(),
        LetterGrade::D | LetterGrade::F => text.red(),
    }
}

fn category_colored(category: Category) -> ColoredString {
    let text = category.token();
    match category {
        Category::Homework => text.blue(),
        Category::Quiz => text.magenta(),
        Category::Test => text.red(),
        Category::Project => text.green(),
        Category::Participation => text.yellow(),
        Category::ExtraCredit => text.cyan(),
    }
}

fn status_mark(status: Option<AttendanceStatus>) -> ColoredString {
    match status {
        Some(AttendanceStatus::Present) => "P".green(),
        Some(AttendanceStatus::Absent) => "A".red(),
        Some(AttendanceStatus::Late) => "L".yellow(),
        Some(AttendanceStatus::Excused) => "E".blue(),
        None => "·".dimmed(),
    }
}

fn percent(value: f64) -> String {
    format!("{value:.1}%")
}

/// "3 days ago" for the past, "in 3 days" for the future.
fn relative(timestamp: DateTime<Utc>, now: DateTime<Utc>) -> String {
    let formatter = Formatter::new();
    let delta = now.signed_duration_since(timestamp);
    if delta.num_seconds() >= 0 {
        formatter.convert(delta.to_std().unwrap_or_default())
    } else {
        let ahead = (-delta).to_std().unwrap_or_default();
        let text = formatter.convert(ahead);
        format!("in {}", text.trim_end_matches(" ago"))
    }
}

// --- Students ---

pub fn render_students(rows: &[StudentRow]) -> String {
    let mut out = String::new();
    for row in rows {
        let s = &row.student;
        let _ = writeln!(
            out,
            "{:>4}. {} {:>2}  {} {:>6} {}  {:>6}",
            s.id,
            cell(&s.full_name(), NAME_WIDTH),
            s.grade.token(),
            cell(&s.email, EMAIL_WIDTH).dimmed(),
            format!("{:.1}", row.average_grade),
            letter_colored(LetterGrade::from_score(row.average_grade)),
            percent(row.attendance_rate),
        );
    }
    out
}

pub fn render_student(row: &StudentRow, now: DateTime<Utc>) -> String {
    let s: &Student = &row.student;
    let mut out = String::new();
    let _ = writeln!(out, "{} {}", format!("{}.", s.id).yellow(), s.full_name().bold());
    let _ = writeln!(out, "  Grade:       {}", s.grade.label());
    let _ = writeln!(out, "  Email:       {}", s.email);
    let _ = writeln!(out, "  Status:      {}", s.status);
    let _ = writeln!(
        out,
        "  Enrolled:    {} ({})",
        s.enrollment_date.format("%Y-%m-%d"),
        relative(s.enrollment_date, now)
    );
    let _ = writeln!(
        out,
        "  Average:     {:.1} {}",
        row.average_grade,
        letter_colored(LetterGrade::from_score(row.average_grade))
    );
    let _ = writeln!(out, "  Attendance:  {}", percent(row.attendance_rate));
    out
}

// --- Assignments ---

pub fn render_assignments(assignments: &[Assignment], now: DateTime<Utc>) -> String {
    let mut out = String::new();
    for a in assignments {
        let due = relative(a.due_date, now);
        let due = if a.due_date < now {
            due.red()
        } else {
            due.normal()
        };
        let _ = writeln!(
            out,
            "{:>4}. {} {} {:>6} pts  {}  {}",
            a.id,
            cell(&a.title, TITLE_WIDTH),
            cell(a.category.token(), 13).normal(),
            a.total_points,
            a.due_date.format("%Y-%m-%d"),
            due.dimmed(),
        );
    }
    out
}

// --- Grades ---

fn grade_line(c: &GradeCell) -> String {
    let score = match (&c.grade, c.percentage, c.letter) {
        (Some(g), Some(p), Some(letter)) => {
            format!("{:>6} {:>7} {}", g.score, percent(p), letter_colored(letter))
        }
        _ => format!("{:>6} {:>7} {}", "-", "", " ").dimmed().to_string(),
    };
    let comment = c
        .grade
        .as_ref()
        .and_then(|g| g.comments.as_deref())
        .unwrap_or("");
    format!(
        "{:>4}. {} {}  {}",
        c.student.id,
        cell(&c.student.full_name(), NAME_WIDTH),
        score,
        comment.dimmed()
    )
}

pub fn render_grade_matrix(matrix: &GradeMatrix) -> String {
    let a = &matrix.assignment;
    let mut out = String::new();
    let _ = writeln!(
        out,
        "{} {} ({}, {} pts, due {})",
        format!("{}.", a.id).yellow(),
        a.title.bold(),
        category_colored(a.category),
        a.total_points,
        a.due_date.format("%Y-%m-%d")
    );
    for row in &matrix.rows {
        let _ = writeln!(out, "{}", grade_line(row));
    }
    let _ = writeln!(
        out,
        "{}",
        format!(
            "{} of {} graded, average {}",
            matrix.graded,
            matrix.rows.len(),
            percent(matrix.average_percentage)
        )
        .dimmed()
    );
    out
}

pub fn render_grade_cell(cell: &GradeCell) -> String {
    format!("{}\n", grade_line(cell))
}

// --- Attendance ---

pub fn render_week(week: &AttendanceWeek) -> String {
    let mut out = String::new();
    let header: String = week
        .days
        .iter()
        .map(|d| format!(" {}", d.format("%a %d")))
        .collect();
    let _ = writeln!(out, "{:>6}{}{}", "", cell("", NAME_WIDTH), header.bold());
    for row in &week.rows {
        let marks: String = row
            .marks
            .iter()
            .map(|m| format!("   {}   ", status_mark(m.as_ref().map(|a| a.status))))
            .collect();
        let _ = writeln!(
            out,
            "{:>4}. {}{}",
            row.student.id,
            cell(&row.student.full_name(), NAME_WIDTH),
            marks
        );
    }
    let _ = writeln!(
        out,
        "{}",
        format!(
            "{} present of {} marked, rate {}",
            week.present_count,
            week.total_records,
            percent(week.attendance_rate)
        )
        .dimmed()
    );
    out
}

// --- Reports ---

fn report_line(r: &StudentReport) -> String {
    format!(
        "{:>4}. {} {:>2}  {:>6.1} {}  {:>7}  {:>3} graded  {:>2} absent  {:>2} late",
        r.student.id,
        cell(&r.student.full_name(), NAME_WIDTH),
        r.student.grade.token(),
        r.average_grade,
        letter_colored(r.letter()),
        percent(r.attendance_rate),
        r.total_assignments,
        r.missed_days,
        r.late_days,
    )
}

pub fn render_report(report: &ClassReport) -> String {
    let o = &report.overview;
    let mut out = String::new();
    let _ = writeln!(out, "{}", "Class overview".bold());
    let _ = writeln!(out, "  Students:        {}", o.total_students);
    let _ = writeln!(out, "  Class average:   {:.1}", o.class_average);
    let _ = writeln!(out, "  Attendance rate: {}", percent(o.attendance_rate));
    let _ = writeln!(out, "  Grades recorded: {}", o.total_assignments);
    let _ = writeln!(out);
    for r in &report.students {
        let _ = writeln!(out, "{}", report_line(r));
    }
    out
}

// --- Dashboard ---

pub fn render_dashboard(d: &Dashboard, now: DateTime<Utc>) -> String {
    let mut out = String::new();
    let s = &d.stats;
    let _ = writeln!(
        out,
        "{}  {} students   {:.1} average   {} attendance   {} graded assignments",
        "Classroom".bold(),
        s.total_students,
        s.average_grade,
        percent(s.attendance_rate),
        s.total_assignments
    );

    let _ = writeln!(out, "\n{}", "Upcoming".bold());
    if d.upcoming.is_empty() {
        let _ = writeln!(out, "  {}", "Nothing due soon".dimmed());
    }
    for a in &d.upcoming {
        let _ = writeln!(
            out,
            "  {} {} {}",
            cell(&a.title, TITLE_WIDTH),
            category_colored(a.category),
            relative(a.due_date, now).dimmed()
        );
    }

    if !d.overdue.is_empty() {
        let _ = writeln!(out, "\n{}", "Past due".bold());
        for a in &d.overdue {
            let _ = writeln!(
                out,
                "  {} {}",
                cell(&a.title, TITLE_WIDTH),
                relative(a.due_date, now).red()
            );
        }
    }

    let _ = writeln!(out, "\n{}", "Today".bold());
    let present = d
        .today_attendance
        .iter()
        .filter(|a| a.status == AttendanceStatus::Present)
        .count();
    let _ = writeln!(
        out,
        "  {} of {} records present",
        present,
        d.today_attendance.len()
    );

    let _ = writeln!(out, "\n{}", "Recent activity".bold());
    for item in &d.activity {
        let _ = writeln!(out, "  {}", item.title);
    }
    out
}

// --- Calendar ---

pub fn render_calendar(cal: &MonthCalendar) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "{}", format!("{:04}-{:02}", cal.year, cal.month).bold());
    let _ = writeln!(out, "{}", " Su  Mo  Tu  We  Th  Fr  Sa".dimmed());

    let mut line = "    ".repeat(cal.leading_blanks as usize);
    for day in &cal.days {
        let label = format!("{:>3}", day.day);
        let label = if day.markers.is_empty() {
            label.normal()
        } else {
            label.bold().underline()
        };
        let _ = write!(line, "{label} ");
        if (cal.leading_blanks + day.day) % 7 == 0 {
            let _ = writeln!(out, "{}", line.trim_end());
            line.clear();
        }
    }
    if !line.is_empty() {
        let _ = writeln!(out, "{}", line.trim_end());
    }

    let due: Vec<_> = cal.days.iter().filter(|d| !d.markers.is_empty()).collect();
    if !due.is_empty() {
        let _ = writeln!(out);
    }
    for day in due {
        for m in &day.markers {
            let _ = writeln!(
                out,
                "  {:>2}  {} {}",
                day.day,
                cell(&m.title, TITLE_WIDTH),
                category_colored(m.category)
            );
        }
    }
    out
}

// --- Config ---

pub fn render_config(config: &ClassbookConfig) -> String {
    let mut out = String::new();
    for key in KEYS {
        let value = config.get(key).unwrap_or_default();
        let _ = writeln!(out, "{} = {}", key.bold(), value);
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, TimeZone};
    use classbookapp::aggregate::month_calendar;
    use classbookapp::model::GradeLevel;

    fn plain() {
        colored::control::set_override(false);
    }

    fn student(id: u32, first: &str) -> Student {
        Student {
            id,
            first_name: first.into(),
            last_name: "Test".into(),
            grade: GradeLevel::Tenth,
            email: format!("{}@school.edu", first.to_lowercase()),
            enrollment_date: Utc.with_ymd_and_hms(2023, 9, 1, 0, 0, 0).unwrap(),
            status: Default::default(),
        }
    }

    #[test]
    fn truncates_by_display_width() {
        assert_eq!(truncate_to_width("short", 10), "short");
        assert_eq!(truncate_to_width("a longer name", 6), "a lon…");
        assert_eq!(cell("ab", 4), "ab  ");
        assert_eq!(cell("日本語", 4).width(), 4);
    }

    #[test]
    fn relative_times_point_both_ways() {
        let now = Utc.with_ymd_and_hms(2024, 3, 10, 12, 0, 0).unwrap();
        assert_eq!(relative(now - Duration::days(3), now), "3 days ago");
        assert_eq!(relative(now + Duration::days(2), now), "in 2 days");
    }

    #[test]
    fn student_rows_show_stats() {
        plain();
        let rows = vec![StudentRow {
            student: student(1, "Emma"),
            average_grade: 85.0,
            attendance_rate: 50.0,
        }];
        let out = render_students(&rows);
        assert!(out.contains("Emma Test"));
        assert!(out.contains("85.0 B"));
        assert!(out.contains("50.0%"));
    }

    #[test]
    fn calendar_starts_on_the_right_weekday() {
        plain();
        // 2024-03-01 is a Friday: five blank cells
        let cal = month_calendar(&[], 2024, 3).unwrap();
        let out = render_calendar(&cal);
        let first_week = out.lines().nth(2).unwrap();
        assert_eq!(first_week, format!("{}  1   2", " ".repeat(20)));
        assert_eq!(out.lines().count(), 2 + 6);
    }

    #[test]
    fn config_lists_every_key() {
        plain();
        let out = render_config(&ClassbookConfig::default());
        assert_eq!(out.lines().count(), KEYS.len());
        assert!(out.contains("latency = simulated"));
    }
}
