/// Turns a job-type label such as `full-time` into `Full Time`.
pub fn normalize_job_type(raw: &str) -> String {
    title_case(&raw.replace('-', " "))
}

/// Uppercases the first letter of every alphabetic run and lowercases the rest.
fn title_case(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    let mut previous_is_letter = false;
    for c in text.chars() {
        if c.is_alphabetic() {
            if previous_is_letter {
                out.extend(c.to_lowercase());
            } else {
                out.extend(c.to_uppercase());
            }
            previous_is_letter = true;
        } else {
            out.push(c);
            previous_is_letter = false;
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hyphenated_label() {
        assert_eq!(normalize_job_type("full-time"), "Full Time");
        assert_eq!(normalize_job_type("PART-TIME"), "Part Time");
    }

    #[test]
    fn test_word_boundaries_follow_non_letters() {
        assert_eq!(normalize_job_type("contract_to_hire"), "Contract_To_Hire");
        assert_eq!(normalize_job_type("w2 contract"), "W2 Contract");
    }

    #[test]
    fn test_empty_label() {
        assert_eq!(normalize_job_type(""), "");
    }
}
