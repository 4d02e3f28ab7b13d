// Signal extraction: skills, education, experience, role and scene tags.
// Every extractor is a pure, total function over a text; no match means an
// empty result or `unknown`, never an error.

pub mod edu;
pub mod exp;
pub mod handlers;
pub mod normalize;
pub mod skills;
pub mod tags;
