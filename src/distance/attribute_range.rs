use crate::error::{DistanceError, Result};

/// Resolves a range string over `num_attributes` attributes into an
/// activity mask.
///
/// Items are comma separated; each one is a 1-based index, `first`, `last`
/// or an inclusive span `a-b` of those. An empty string selects nothing.
pub fn parse_attribute_range(range: &str, num_attributes: usize) -> Result<Vec<bool>> {
    let mut active = vec![false; num_attributes];
    let range = range.trim();
    if range.is_empty() {
        return Ok(active);
    }

    for item in range.split(',').map(str::trim) {
        let (from, to) = match item.split_once('-') {
            Some((a, b)) => (
                position(a, num_attributes, range)?,
                position(b, num_attributes, range)?,
            ),
            None => {
                let p = position(item, num_attributes, range)?;
                (p, p)
            }
        };
        if from > to {
            return Err(invalid(range, &format!("span '{item}' is reversed")));
        }
        for slot in &mut active[from..=to] {
            *slot = true;
        }
    }
    Ok(active)
}

fn position(token: &str, num_attributes: usize, range: &str) -> Result<usize> {
    let token = token.trim();
    let one_based = match token.to_ascii_lowercase().as_str() {
        "first" => 1,
        "last" => num_attributes,
        other => other
            .parse::<usize>()
            .map_err(|_| invalid(range, &format!("'{token}' is not an index")))?,
    };
    if one_based == 0 || one_based > num_attributes {
        return Err(invalid(
            range,
            &format!("'{token}' is outside 1..={num_attributes}"),
        ));
    }
    Ok(one_based - 1)
}

fn invalid(range: &str, reason: &str) -> DistanceError {
    DistanceError::InvalidParameter(format!("attribute range '{range}': {reason}"))
}
