//! Word valence lexicon.
//!
//! AFINN-style integer valences in `-5..=5`. Entries are lowercase; lookups
//! happen after tokenisation lowercases the input.

pub(super) const WORD_VALENCES: &[(&str, i8)] = &[
    ("abandon", -2),
    ("abandoned", -2),
    ("abuse", -3),
    ("abused", -3),
    ("accept", 1),
    ("accepted", 1),
    ("accident", -2),
    ("admire", 3),
    ("adorable", 3),
    ("adore", 3),
    ("afraid", -2),
    ("aggressive", -2),
    ("agree", 1),
    ("alarm", -2),
    ("alarming", -2),
    ("amazing", 4),
    ("anger", -3),
    ("angry", -3),
    ("annoy", -2),
    ("annoyed", -2),
    ("annoying", -2),
    ("anxious", -2),
    ("appreciate", 2),
    ("appreciated", 2),
    ("approve", 2),
    ("awesome", 4),
    ("awful", -3),
    ("bad", -3),
    ("beautiful", 3),
    ("best", 3),
    ("betray", -3),
    ("betrayed", -3),
    ("better", 2),
    ("bitter", -2),
    ("blame", -2),
    ("bless", 2),
    ("bogus", -3),
    ("boring", -3),
    ("brilliant", 4),
    ("broken", -1),
    ("calm", 2),
    ("care", 2),
    ("celebrate", 3),
    ("charming", 3),
    ("cheat", -3),
    ("cheated", -3),
    ("cheerful", 2),
    ("clean", 2),
    ("clever", 2),
    ("comfortable", 2),
    ("confident", 2),
    ("confused", -2),
    ("cool", 1),
    ("corrupt", -3),
    ("crap", -3),
    ("crash", -2),
    ("crazy", -2),
    ("crime", -3),
    ("cruel", -3),
    ("cry", -1),
    ("damage", -3),
    ("danger", -2),
    ("dangerous", -2),
    ("dead", -3),
    ("deceive", -3),
    ("deceptive", -3),
    ("delight", 3),
    ("delighted", 3),
    ("depressed", -2),
    ("despise", -3),
    ("destroy", -3),
    ("dirty", -2),
    ("disappoint", -2),
    ("disappointed", -2),
    ("disappointing", -2),
    ("disaster", -2),
    ("disgusting", -3),
    ("dishonest", -2),
    ("dislike", -2),
    ("doubt", -1),
    ("dumb", -3),
    ("eager", 2),
    ("easy", 1),
    ("effective", 2),
    ("enjoy", 2),
    ("enjoyed", 2),
    ("evil", -3),
    ("excellent", 3),
    ("excited", 3),
    ("exciting", 3),
    ("fail", -2),
    ("failed", -2),
    ("failure", -2),
    ("fair", 2),
    ("fake", -3),
    ("false", -1),
    ("fantastic", 4),
    ("fear", -2),
    ("fine", 2),
    ("fraud", -4),
    ("fraudulent", -4),
    ("free", 1),
    ("friendly", 2),
    ("fun", 4),
    ("funny", 4),
    ("glad", 3),
    ("good", 3),
    ("gorgeous", 3),
    ("grateful", 3),
    ("great", 3),
    ("greed", -3),
    ("guilty", -3),
    ("happy", 3),
    ("harm", -2),
    ("hate", -3),
    ("hated", -3),
    ("hatred", -3),
    ("help", 2),
    ("helpful", 2),
    ("honest", 2),
    ("hope", 2),
    ("hopeless", -2),
    ("horrible", -3),
    ("hurt", -2),
    ("ideal", 3),
    ("idiot", -3),
    ("ignore", -1),
    ("ill", -2),
    ("impressive", 3),
    ("inspiring", 3),
    ("insult", -2),
    ("joy", 3),
    ("kind", 2),
    ("lame", -2),
    ("liar", -3),
    ("lie", -2),
    ("lied", -2),
    ("like", 2),
    ("liked", 2),
    ("lost", -3),
    ("love", 3),
    ("loved", 3),
    ("lovely", 3),
    ("loving", 2),
    ("lucky", 3),
    ("mad", -3),
    ("mess", -2),
    ("misleading", -3),
    ("miserable", -3),
    ("mistake", -2),
    ("nasty", -3),
    ("nice", 3),
    ("outstanding", 5),
    ("pain", -2),
    ("panic", -3),
    ("perfect", 3),
    ("pleasant", 3),
    ("pleased", 3),
    ("poor", -2),
    ("positive", 2),
    ("praise", 3),
    ("pretty", 1),
    ("problem", -2),
    ("proud", 2),
    ("rage", -2),
    ("recommend", 2),
    ("relief", 1),
    ("rotten", -3),
    ("rude", -2),
    ("sad", -2),
    ("safe", 1),
    ("satisfied", 2),
    ("scam", -2),
    ("scandal", -3),
    ("scared", -2),
    ("secure", 2),
    ("shame", -2),
    ("shit", -4),
    ("sick", -2),
    ("smile", 2),
    ("sorry", -1),
    ("spam", -2),
    ("stupid", -2),
    ("success", 2),
    ("successful", 3),
    ("suck", -3),
    ("sucks", -3),
    ("super", 3),
    ("superb", 5),
    ("support", 2),
    ("terrible", -3),
    ("terrific", 4),
    ("thank", 2),
    ("thanks", 2),
    ("threat", -2),
    ("trust", 1),
    ("trusted", 2),
    ("ugly", -3),
    ("unhappy", -2),
    ("upset", -2),
    ("useful", 2),
    ("useless", -2),
    ("violence", -3),
    ("weak", -2),
    ("win", 4),
    ("wonderful", 4),
    ("worried", -3),
    ("worse", -3),
    ("worst", -3),
    ("worthless", -2),
    ("wow", 4),
    ("wrong", -2),
    ("yes", 1),
];

/// Tokens that flip the valence of the token that follows them.
pub(super) const NEGATORS: &[&str] = &[
    "aren't", "arent", "can't", "cannot", "cant", "couldn't", "couldnt", "didn't", "didnt",
    "doesn't", "doesnt", "don't", "dont", "hardly", "isn't", "isnt", "never", "no", "nobody",
    "none", "nor", "not", "nothing", "shouldn't", "shouldnt", "wasn't", "wasnt", "weren't",
    "werent", "without", "won't", "wont", "wouldn't", "wouldnt",
];
