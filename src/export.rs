use crate::error::{LoanError, LoanResult};
use crate::schedule::ScheduleEntry;
use std::io;

pub const CSV_HEADER: [&str; 5] = ["Month", "Payment", "Interest", "Principal", "Balance"];

/// Write a schedule as CSV, currency columns to two decimal places.
pub fn write_csv<W: io::Write>(schedule: &[ScheduleEntry], writer: W) -> LoanResult<()> {
    let mut wtr = csv::Writer::from_writer(writer);
    wtr.write_record(CSV_HEADER)?;
    for pmt in schedule {
        wtr.write_record([
            pmt.period.to_string(),
            format!("{:.2}", pmt.payment),
            format!("{:.2}", pmt.interest),
            format!("{:.2}", pmt.principal),
            format!("{:.2}", pmt.balance),
        ])?;
    }
    wtr.flush()?;
    Ok(())
}

pub fn to_csv_string(schedule: &[ScheduleEntry]) -> LoanResult<String> {
    let mut buf = Vec::new();
    write_csv(schedule, &mut buf)?;
    String::from_utf8(buf).map_err(|e| LoanError::Export(e.to_string()))
}

#[cfg(test)]
mod tests {
    use super::{to_csv_string, write_csv};
    use crate::loan::LoanTerms;
    use crate::schedule::{Amortization, ScheduleEntry};
    use test_log::test;

    #[test]
    fn test_zero_rate_csv() {
        let loan = Amortization::new(LoanTerms::new(1200., 0., 1).unwrap()).unwrap();
        let csv = to_csv_string(loan.schedule()).unwrap();
        let lines: Vec<&str> = csv.lines().collect();

        assert_eq!(lines.len(), 13);
        assert_eq!(lines[0], "Month,Payment,Interest,Principal,Balance");
        assert_eq!(lines[1], "1,100.00,0.00,100.00,1100.00");
        assert_eq!(lines[12], "12,100.00,0.00,100.00,0.00");
    }

    #[test]
    fn test_amortized_csv() {
        let loan = Amortization::new(LoanTerms::new(200000., 5., 30).unwrap()).unwrap();
        let csv = to_csv_string(loan.schedule()).unwrap();
        let lines: Vec<&str> = csv.lines().collect();

        assert_eq!(lines.len(), 361);
        assert_eq!(lines[1], "1,1073.64,833.33,240.31,199759.69");
        assert!(lines[360].starts_with("360,1073.64,"));
        assert!(lines[360].ends_with(",0.00"));
    }

    #[test]
    fn test_empty_schedule_writes_header() {
        let empty: Vec<ScheduleEntry> = Vec::new();
        let mut buf = Vec::new();
        write_csv(&empty, &mut buf).unwrap();
        assert_eq!(
            String::from_utf8(buf).unwrap(),
            "Month,Payment,Interest,Principal,Balance\n"
        );
    }
}
