mod merge;
mod support;
mod synthesizer;
