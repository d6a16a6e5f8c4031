use crate::grades::Grade;
use crate::numeric::parse_leading_float;
use crate::table::CourseRow;
use serde::Serialize;

pub const NO_VALID_ROWS_MESSAGE: &str =
    "Please enter valid credits and select a grade for at least one course.";

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum CalcError {
    #[error("{}", NO_VALID_ROWS_MESSAGE)]
    NoValidRows,
}

impl CalcError {
    pub fn code(&self) -> &'static str {
        match self {
            CalcError::NoValidRows => "no_valid_rows",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum SkipReason {
    BlankCredits,
    UnparseableCredits,
    NonPositiveCredits,
    MissingGrade,
}

/// How one row fed into the average.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum RowDisposition {
    Counted { credits: f64, points: f64 },
    Skipped(SkipReason),
}

impl RowDisposition {
    pub fn of(row: &CourseRow) -> Self {
        let credits = match parse_leading_float(&row.credits) {
            None if row.credits.trim().is_empty() => {
                return RowDisposition::Skipped(SkipReason::BlankCredits)
            }
            None => return RowDisposition::Skipped(SkipReason::UnparseableCredits),
            // Infinity has a numeric prefix but no usable weight.
            Some(c) if !c.is_finite() => {
                return RowDisposition::Skipped(SkipReason::UnparseableCredits)
            }
            Some(c) if c <= 0.0 => return RowDisposition::Skipped(SkipReason::NonPositiveCredits),
            Some(c) => c,
        };
        let Some(grade) = row.grade else {
            return RowDisposition::Skipped(SkipReason::MissingGrade);
        };
        RowDisposition::Counted {
            credits,
            points: Grade::points(grade),
        }
    }

    pub fn skip_reason(&self) -> Option<SkipReason> {
        match self {
            RowDisposition::Counted { .. } => None,
            RowDisposition::Skipped(r) => Some(*r),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct SgpaSummary {
    pub sgpa: f64,
    pub display: String,
    pub total_credits: f64,
    pub total_grade_points: f64,
    pub counted_rows: usize,
    pub skipped_rows: usize,
    pub rows: Vec<RowDisposition>,
}

/// Two-decimal text of `x`, rounded on its exact binary value.
///
/// Values such as 6.675 are stored slightly below the decimal and print as
/// "6.67". Only exact binary ties, which are odd multiples of 1/8, fall halfway
/// between two hundredths; those go to the larger neighbour (8.125 → "8.13").
pub fn format_sgpa(x: f64) -> String {
    let eighths = x * 8.0;
    let is_tie = eighths.fract() == 0.0 && eighths % 2.0 != 0.0;
    if is_tie && eighths.abs() < 1e15 {
        return format!("{:.2}", (x * 100.0).ceil() / 100.0);
    }
    format!("{:.2}", x)
}

/// Credit-weighted mean of grade points over the complete rows.
///
/// Rows with blank, unparseable, zero, negative or infinite credits, and rows
/// without a grade, are skipped and never reported as errors. Only a table
/// with no complete rows at all fails.
pub fn compute_sgpa(rows: &[CourseRow]) -> Result<SgpaSummary, CalcError> {
    let mut total_credits = 0.0_f64;
    let mut total_grade_points = 0.0_f64;
    let mut counted_rows = 0_usize;
    let mut skipped_rows = 0_usize;
    let mut dispositions = Vec::with_capacity(rows.len());

    for row in rows {
        let d = RowDisposition::of(row);
        match d {
            RowDisposition::Counted { credits, points } => {
                total_credits += credits;
                total_grade_points += credits * points;
                counted_rows += 1;
            }
            RowDisposition::Skipped(_) => {
                skipped_rows += 1;
            }
        }
        dispositions.push(d);
    }

    if counted_rows == 0 {
        return Err(CalcError::NoValidRows);
    }

    let sgpa = if total_credits.is_finite() && total_grade_points.is_finite() {
        total_grade_points / total_credits
    } else {
        scaled_mean(&dispositions)
    };
    Ok(SgpaSummary {
        sgpa,
        display: format_sgpa(sgpa),
        total_credits,
        total_grade_points,
        counted_rows,
        skipped_rows,
        rows: dispositions,
    })
}

// Huge but finite credits overflow the plain sums. Dividing every weight by the
// largest one keeps each term at most 1, and the mean is unchanged.
fn scaled_mean(rows: &[RowDisposition]) -> f64 {
    let counted = || {
        rows.iter().filter_map(|d| match d {
            RowDisposition::Counted { credits, points } => Some((*credits, *points)),
            RowDisposition::Skipped(_) => None,
        })
    };
    let max_credits = counted().map(|(c, _)| c).fold(0.0_f64, f64::max);
    let (weights, weighted) = counted().fold((0.0_f64, 0.0_f64), |(w, wp), (c, p)| {
        let share = c / max_credits;
        (w + share, wp + share * p)
    });
    weighted / weights
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn row(credits: &str, grade: &str) -> CourseRow {
        CourseRow::new(
            credits,
            if grade.is_empty() {
                None
            } else {
                Some(grade.parse().expect("grade label"))
            },
        )
    }

    #[test]
    fn weighted_mean_of_two_courses() {
        let s = compute_sgpa(&[row("4", "AA"), row("3", "BB")]).expect("sgpa");
        assert_eq!(s.total_grade_points, 60.0);
        assert_eq!(s.total_credits, 7.0);
        assert_eq!(s.display, "8.57");
        assert_eq!(s.counted_rows, 2);
        assert_eq!(s.skipped_rows, 0);
    }

    #[test]
    fn initial_empty_row_has_no_valid_rows() {
        let err = compute_sgpa(&[CourseRow::default()]).expect_err("no rows");
        assert_eq!(err, CalcError::NoValidRows);
        assert_eq!(err.code(), "no_valid_rows");
        assert_eq!(err.to_string(), NO_VALID_ROWS_MESSAGE);
    }

    #[test]
    fn zero_credit_row_is_skipped() {
        let s = compute_sgpa(&[row("0", "AA"), row("5", "CC")]).expect("sgpa");
        assert_eq!(s.display, "7.00");
        assert_eq!(
            s.rows[0],
            RowDisposition::Skipped(SkipReason::NonPositiveCredits)
        );
    }

    #[test]
    fn garbage_credits_are_skipped_not_reported() {
        let s = compute_sgpa(&[row("abc", "AA"), row("2", "EX")]).expect("sgpa");
        assert_eq!(s.display, "10.00");
        assert_eq!(s.skipped_rows, 1);
        assert_eq!(s.rows[0].skip_reason(), Some(SkipReason::UnparseableCredits));
    }

    #[test]
    fn negative_credits_cannot_cancel_positive_ones() {
        // Without the non-positive skip rule these two would sum to zero credits.
        let s = compute_sgpa(&[row("-4", "AA"), row("4", "BB")]).expect("sgpa");
        assert_eq!(s.total_credits, 4.0);
        assert_eq!(s.display, "8.00");

        let err = compute_sgpa(&[row("-4", "AA")]).expect_err("only negative");
        assert_eq!(err, CalcError::NoValidRows);
    }

    #[test]
    fn skip_reasons_cover_each_incomplete_shape() {
        let s = compute_sgpa(&[
            row("", "AA"),
            row("x", "AA"),
            row("Infinity", "AA"),
            row("3", ""),
            row("3abc", "FF"),
        ])
        .expect("last row counts");
        let reasons: Vec<Option<SkipReason>> = s.rows.iter().map(|d| d.skip_reason()).collect();
        assert_eq!(
            reasons,
            vec![
                Some(SkipReason::BlankCredits),
                Some(SkipReason::UnparseableCredits),
                Some(SkipReason::UnparseableCredits),
                Some(SkipReason::MissingGrade),
                None,
            ]
        );
        assert_eq!(s.display, "0.00");
    }

    #[test]
    fn fractional_credits_weight_proportionally() {
        let s = compute_sgpa(&[row("1.5", "AB"), row("0.5", "DE")]).expect("sgpa");
        // (1.5 * 8.5 + 0.5 * 5.5) / 2.0 = 7.75
        assert_eq!(s.display, "7.75");
    }

    #[test]
    fn display_rounds_the_stored_binary_value() {
        assert_eq!(format_sgpa(8.0), "8.00");
        assert_eq!(format_sgpa(60.0 / 7.0), "8.57");
        assert_eq!(format_sgpa(9.999), "10.00");
        // 2.675 and 1.005 are stored just below the written decimal.
        assert_eq!(format_sgpa(2.675), "2.67");
        assert_eq!(format_sgpa(1.005), "1.00");
    }

    #[test]
    fn exact_binary_ties_round_up() {
        assert_eq!(format_sgpa(8.125), "8.13");
        assert_eq!(format_sgpa(7.125), "7.13");
        assert_eq!(format_sgpa(0.375), "0.38");
        assert_eq!(format_sgpa(9.875), "9.88");
    }

    #[test]
    fn quarter_credit_tables_display_like_the_stored_mean() {
        // (2.01 * 10 + 17.99 * 0) / 20 is stored as 1.00499...
        let s = compute_sgpa(&[row("2.01", "EX"), row("17.99", "FF")]).expect("sgpa");
        assert_eq!(s.display, "1.00");

        // (0.25 * 10 + 4.75 * 6.5) / 5 is stored as 6.67499...
        let s = compute_sgpa(&[row("0.25", "EX"), row("4.75", "CD")]).expect("sgpa");
        assert_eq!(s.display, "6.67");

        // (3.5 * 8.5 + 0.5 * 5.5) / 4 is exactly 8.125.
        let s = compute_sgpa(&[row("3.5", "AB"), row("0.5", "DE")]).expect("sgpa");
        assert_eq!(s.display, "8.13");
    }

    #[test]
    fn huge_finite_credits_still_give_a_two_decimal_mean() {
        let s = compute_sgpa(&[row("1e308", "EX")]).expect("sgpa");
        assert_eq!(s.display, "10.00");

        let s = compute_sgpa(&[row("1e308", "AA"), row("1e308", "BB")]).expect("sgpa");
        assert_eq!(s.display, "8.50");
        assert!(!s.total_credits.is_finite());

        let s = compute_sgpa(&[row("1e308", "EX"), row("1e308", "FF"), row("2", "FF")])
            .expect("sgpa");
        assert_eq!(s.display, "5.00");
    }

    #[test]
    fn repeated_calls_agree() {
        let rows = vec![row("4", "AB"), row("2", "CD"), row("", "")];
        assert_eq!(compute_sgpa(&rows), compute_sgpa(&rows));
    }

    fn arb_grade() -> impl Strategy<Value = Grade> {
        proptest::sample::select(Grade::ALL.to_vec())
    }

    fn arb_row() -> impl Strategy<Value = CourseRow> {
        let credits = prop_oneof![
            Just(String::new()),
            Just("abc".to_string()),
            (0u32..=12).prop_map(|c| c.to_string()),
            (1u32..=40).prop_map(|h| format!("{}.5", h / 4)),
        ];
        (credits, proptest::option::of(arb_grade())).prop_map(|(c, g)| CourseRow::new(c, g))
    }

    proptest! {
        #[test]
        fn single_complete_row_yields_its_grade_points(
            credits in 1u32..=20,
            grade in arb_grade(),
            blanks in 0usize..5,
        ) {
            let mut rows = vec![CourseRow::new(credits.to_string(), Some(grade))];
            rows.extend(std::iter::repeat(CourseRow::default()).take(blanks));
            let s = compute_sgpa(&rows).expect("one complete row");
            prop_assert_eq!(s.display, format!("{:.2}", grade.points()));
        }

        #[test]
        fn permuting_rows_does_not_change_the_result(
            rows in proptest::collection::vec(arb_row(), 1..8),
        ) {
            let mut reversed = rows.clone();
            reversed.reverse();
            match (compute_sgpa(&rows), compute_sgpa(&reversed)) {
                (Ok(a), Ok(b)) => {
                    prop_assert_eq!(a.display, b.display);
                    prop_assert_eq!(a.counted_rows, b.counted_rows);
                }
                (Err(a), Err(b)) => prop_assert_eq!(a, b),
                (a, b) => prop_assert!(false, "outcomes diverged: {:?} vs {:?}", a, b),
            }
        }
    }
}
