pub mod forge;
pub mod lexicon;
pub mod markov;
pub mod weighted;
