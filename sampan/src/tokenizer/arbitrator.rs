use crate::lexeme::path::LexemePath;
use crate::lexeme::Lexeme;
use crate::tokenizer::context::AnalyzeContext;

/// Groups the pooled lexemes into clusters of overlapping lexemes and
/// registers one path per cluster to the context.
///
/// In smart mode, a cluster of two or more lexemes is resolved into
/// the best non-overlapping path.
pub(crate) fn process(ctx: &mut AnalyzeContext, smart: bool) {
    let mut cross_path = LexemePath::new();
    while let Some(lexeme) = ctx.org_lexemes_mut().pop_first() {
        if let Err(lexeme) = cross_path.add_cross_lexeme(lexeme) {
            let finished = std::mem::take(&mut cross_path);
            ctx.add_lexeme_path(resolve(finished, smart));
            // An empty path accepts any lexeme.
            let _ = cross_path.add_cross_lexeme(lexeme);
        }
    }
    if !cross_path.is_empty() {
        ctx.add_lexeme_path(resolve(cross_path, smart));
    }
}

fn resolve(cross_path: LexemePath, smart: bool) -> LexemePath {
    if cross_path.len() == 1 || !smart {
        return cross_path;
    }
    let lexemes: Vec<Lexeme> = cross_path.lexemes().iter().cloned().collect();
    judge(&lexemes)
}

/// Adds lexemes from `lexemes[start..]` that do not overlap the path,
/// returning the indices of the rejected ones.
fn forward_path(lexemes: &[Lexeme], start: usize, option: &mut LexemePath) -> Vec<usize> {
    let mut conflicts = vec![];
    for (i, lexeme) in lexemes.iter().enumerate().skip(start) {
        if !option.add_not_cross_lexeme(lexeme) {
            conflicts.push(i);
        }
    }
    conflicts
}

/// Removes lexemes from the tail until the path accepts `lexeme`.
fn back_path(lexeme: &Lexeme, option: &mut LexemePath) {
    while option.check_cross(lexeme) {
        option.remove_tail();
    }
}

/// Finds the best path of a cluster sorted in the lexeme order.
fn judge(lexemes: &[Lexeme]) -> LexemePath {
    let mut option = LexemePath::new();
    let mut conflicts = forward_path(lexemes, 0, &mut option);
    let mut candidates = vec![option.clone()];

    while let Some(i) = conflicts.pop() {
        back_path(&lexemes[i], &mut option);
        forward_path(lexemes, i, &mut option);
        candidates.push(option.clone());
    }

    let mut best = 0;
    for (i, candidate) in candidates.iter().enumerate().skip(1) {
        if candidate.compare(&candidates[best]).is_lt() {
            best = i;
        }
    }
    log::trace!(
        "Resolved {} lexemes at {}..{}: candidate {best} of {}",
        lexemes.len(),
        candidates[best].path_begin(),
        candidates[best].path_end(),
        candidates.len(),
    );
    candidates.swap_remove(best)
}
