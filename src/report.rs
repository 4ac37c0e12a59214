//! Textual report rendering.
//!
//! Pure transformation of the engine's visitation record into the ledger
//! report. Line layout and punctuation are load-bearing: downstream
//! consumers diff this output, so the emailed section always precedes the
//! not-emailed one and both headers are printed even when a section is
//! empty.

use crate::engine::{CompanyTopUp, CreditedUser};
use crate::error::Result;
use std::io::Write;

/// Writes the report for all processed companies.
///
/// Companies appear in the order the engine produced them; users within a
/// section appear in visit order. Each company section is followed by a
/// blank separator line.
pub fn write_report<W: Write>(outcomes: &[CompanyTopUp], mut writer: W) -> Result<()> {
    writeln!(writer)?;

    for outcome in outcomes {
        writeln!(writer, "\tCompany Id: {}", outcome.company_id)?;
        writeln!(writer, "\tCompany Name: {}", outcome.company_name)?;

        writeln!(writer, "\tUsers Emailed:")?;
        for user in &outcome.emailed {
            write_user(&mut writer, user)?;
        }

        writeln!(writer, "\tUsers Not Emailed:")?;
        for user in &outcome.not_emailed {
            write_user(&mut writer, user)?;
        }

        writeln!(
            writer,
            "\t\tTotal amount of top ups for {}: {}",
            outcome.company_name, outcome.total
        )?;
        writeln!(writer)?;
    }

    Ok(())
}

fn write_user<W: Write>(writer: &mut W, user: &CreditedUser) -> Result<()> {
    writeln!(
        writer,
        "\t\t{}, {}, {}",
        user.last_name, user.first_name, user.email
    )?;
    writeln!(
        writer,
        "\t\t  Previous Token Balance, {}",
        user.previous_tokens
    )?;
    writeln!(writer, "\t\t  New Token Balance {}", user.new_tokens)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn credited(last: &str, first: &str, email: &str, previous: i64, new: i64) -> CreditedUser {
        CreditedUser {
            last_name: last.to_string(),
            first_name: first.to_string(),
            email: email.to_string(),
            previous_tokens: previous,
            new_tokens: new,
        }
    }

    fn render(outcomes: &[CompanyTopUp]) -> String {
        let mut output = Vec::new();
        write_report(outcomes, &mut output).unwrap();
        String::from_utf8(output).unwrap()
    }

    #[test]
    fn test_report_layout() {
        let outcomes = vec![CompanyTopUp {
            company_id: 1,
            company_name: "Acme".to_string(),
            emailed: vec![credited("Lee", "Ann", "ann.lee@acme.test", 5, 15)],
            not_emailed: vec![credited("Ng", "Bo", "bo.ng@acme.test", 8, 18)],
            total: 20,
        }];

        let expected = "\n\
            \tCompany Id: 1\n\
            \tCompany Name: Acme\n\
            \tUsers Emailed:\n\
            \t\tLee, Ann, ann.lee@acme.test\n\
            \t\t  Previous Token Balance, 5\n\
            \t\t  New Token Balance 15\n\
            \tUsers Not Emailed:\n\
            \t\tNg, Bo, bo.ng@acme.test\n\
            \t\t  Previous Token Balance, 8\n\
            \t\t  New Token Balance 18\n\
            \t\tTotal amount of top ups for Acme: 20\n\
            \n";
        assert_eq!(render(&outcomes), expected);
    }

    #[test]
    fn test_empty_sections_still_print_headers() {
        let outcomes = vec![CompanyTopUp {
            company_id: 2,
            company_name: "Globex".to_string(),
            emailed: Vec::new(),
            not_emailed: vec![credited("Ng", "Bo", "bo.ng@globex.test", 0, 3)],
            total: 3,
        }];

        let output = render(&outcomes);
        assert!(output.contains("\tUsers Emailed:\n\tUsers Not Emailed:\n"));
    }

    #[test]
    fn test_no_processed_companies_renders_only_the_leading_blank_line() {
        assert_eq!(render(&[]), "\n");
    }

    #[test]
    fn test_companies_render_in_given_order() {
        let make = |id: i64, name: &str| CompanyTopUp {
            company_id: id,
            company_name: name.to_string(),
            emailed: Vec::new(),
            not_emailed: Vec::new(),
            total: 0,
        };

        let output = render(&[make(1, "A"), make(2, "B")]);
        let first = output.find("Company Id: 1").unwrap();
        let second = output.find("Company Id: 2").unwrap();
        assert!(first < second);
    }
}
