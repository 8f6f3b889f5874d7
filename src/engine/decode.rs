// Greedy decoding loop shared by model runtimes

use crate::error::Result;

/// Run greedy decoding until `eos` or `max_length` tokens.
///
/// The output is `[start, forced_bos, ...]`. `next` receives the tokens
/// produced so far and returns the argmax of the following step. When the
/// cap is reached before the model emits `eos`, the last slot is forced to
/// `eos`, as `forced_eos_token_id` does in the reference generation config.
pub fn greedy_decode<F>(
    start: u32,
    forced_bos: u32,
    eos: u32,
    max_length: usize,
    mut next: F,
) -> Result<Vec<u32>>
where
    F: FnMut(&[u32]) -> Result<u32>,
{
    let mut output = Vec::with_capacity(max_length.max(2));
    output.push(start);
    output.push(forced_bos);

    while output.len() < max_length {
        if output.len() + 1 == max_length {
            output.push(eos);
            break;
        }

        let token = next(&output)?;
        output.push(token);
        if token == eos {
            break;
        }
    }

    Ok(output)
}
