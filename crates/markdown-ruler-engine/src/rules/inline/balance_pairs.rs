//! Pairs opening and closing delimiters.
//!
//! Each closer walks back over candidate openers. `jumps` lets the walk
//! hop over already-paired ranges and `openers_bottom` remembers, per
//! marker and length class, how far back a previous failed search went, so
//! the whole pass stays linear on adversarial input.

use std::collections::HashMap;

use crate::state::{Delimiter, StateInline};

fn process_delimiters(delimiters: &mut [Delimiter]) {
    let max = delimiters.len();
    if max == 0 {
        return;
    }

    let mut openers_bottom: HashMap<char, [isize; 6]> = HashMap::new();
    let mut header_idx = 0;
    let mut last_token_idx: isize = -2;
    let mut jumps: Vec<usize> = Vec::with_capacity(max);

    for closer_idx in 0..max {
        jumps.push(0);

        // Adjacent markers of the same char form one run.
        if delimiters[header_idx].marker != delimiters[closer_idx].marker
            || last_token_idx != delimiters[closer_idx].token as isize - 1
        {
            header_idx = closer_idx;
        }
        last_token_idx = delimiters[closer_idx].token as isize;

        let closer = &delimiters[closer_idx];
        if !closer.close {
            continue;
        }

        let marker = closer.marker;
        let closer_length = closer.length;
        let closer_open = closer.open;
        let bucket = if closer_open { 3 } else { 0 } + closer_length % 3;
        let min_opener_idx = openers_bottom.entry(marker).or_insert([-1; 6])[bucket];

        let mut opener_idx = header_idx as isize - jumps[header_idx] as isize - 1;
        let mut new_min_opener_idx = opener_idx;

        while opener_idx > min_opener_idx {
            let oi = opener_idx as usize;
            let opener = &delimiters[oi];

            if opener.marker == marker && opener.open && opener.end.is_none() {
                // Rule of three: a delimiter that can both open and close
                // can't pair with one whose combined length is a multiple
                // of three, unless both are.
                let is_odd_match = (opener.close || closer_open)
                    && (opener.length + closer_length) % 3 == 0
                    && (opener.length % 3 != 0 || closer_length % 3 != 0);

                if !is_odd_match {
                    let last_jump = if oi > 0 && !delimiters[oi - 1].open {
                        jumps[oi - 1] + 1
                    } else {
                        0
                    };

                    jumps[closer_idx] = closer_idx - oi + last_jump;
                    jumps[oi] = last_jump;

                    delimiters[closer_idx].open = false;
                    delimiters[closer_idx].end = Some(oi);
                    delimiters[oi].end = Some(closer_idx);
                    delimiters[oi].close = false;
                    new_min_opener_idx = -1;
                    // A pair splits the run; the next closer starts a new one.
                    last_token_idx = -2;
                    break;
                }
            }

            opener_idx -= jumps[oi] as isize + 1;
        }

        if new_min_opener_idx != -1 {
            openers_bottom.entry(marker).or_insert([-1; 6])[bucket] = new_min_opener_idx;
        }
    }
}

pub fn balance_pairs(state: &mut StateInline<'_>) {
    process_delimiters(&mut state.delimiters);
    for delimiters in state.tokens_meta.iter_mut().flatten() {
        process_delimiters(delimiters);
    }
}
