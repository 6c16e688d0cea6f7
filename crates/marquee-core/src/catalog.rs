//! Static category definitions for the home screen.

use marquee_api::MediaKind;

/// Where a category's items come from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CategorySource {
    /// One provider search call.
    Listing {
        query: String,
        kind: Option<MediaKind>,
    },
    /// A genre's canonical title list; unknown genres use the action list.
    Genre(String),
    /// A fixed canonical title list, looked up title by title.
    Titles(Vec<String>),
}

/// A named row. `key` identifies the fetch: a row whose key changes
/// starts a new fetch cycle.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Category {
    pub key: String,
    pub title: String,
    pub source: CategorySource,
    /// Rendered with tall poster tiles.
    pub large: bool,
}

impl Category {
    pub fn titles(key: &str, title: &str, titles: &[&str]) -> Self {
        Self {
            key: key.to_string(),
            title: title.to_string(),
            source: CategorySource::Titles(titles.iter().map(|t| t.to_string()).collect()),
            large: false,
        }
    }

    pub fn genre(key: &str, title: &str, genre: &str) -> Self {
        Self {
            key: key.to_string(),
            title: title.to_string(),
            source: CategorySource::Genre(genre.to_string()),
            large: false,
        }
    }

    /// An ad-hoc search row.
    pub fn search(query: &str, kind: Option<MediaKind>) -> Self {
        let scope = kind.map(MediaKind::as_str).unwrap_or("all");
        Self {
            key: format!("search:{scope}:{query}"),
            title: format!("Results for \"{query}\""),
            source: CategorySource::Listing {
                query: query.to_string(),
                kind,
            },
            large: false,
        }
    }

    pub fn large(mut self) -> Self {
        self.large = true;
        self
    }
}

// ── Canonical title lists ───────────────────────────────────────

pub const POPULAR_MOVIES: &[&str] = &[
    "The Dark Knight",
    "Inception",
    "Interstellar",
    "The Matrix",
    "Pulp Fiction",
    "The Shawshank Redemption",
    "Fight Club",
    "Goodfellas",
    "The Godfather",
    "Forrest Gump",
    "The Lord of the Rings",
    "Star Wars",
];

pub const POPULAR_SERIES: &[&str] = &[
    "Breaking Bad",
    "Game of Thrones",
    "Stranger Things",
    "The Office",
    "Friends",
    "The Crown",
    "Narcos",
    "Black Mirror",
    "Sherlock",
    "The Witcher",
    "Money Heist",
    "Dark",
];

pub const TOP_RATED: &[&str] = &[
    "The Shawshank Redemption",
    "The Godfather",
    "The Dark Knight",
    "Pulp Fiction",
    "The Lord of the Rings",
    "Schindler's List",
    "Inception",
    "Fight Club",
    "Goodfellas",
    "The Matrix",
];

pub const DOCUMENTARIES: &[&str] = &[
    "Free Solo",
    "Won't You Be My Neighbor",
    "March of the Penguins",
    "An Inconvenient Truth",
    "Bowling for Columbine",
    "Fahrenheit 9/11",
    "Super Size Me",
    "The Social Dilemma",
    "Blackfish",
    "Food, Inc.",
];

pub const ACTION_SERIES: &[&str] = &[
    "Breaking Bad",
    "Better Call Saul",
    "The Walking Dead",
    "24",
    "Prison Break",
    "Narcos",
    "The Punisher",
    "Daredevil",
    "Arrow",
    "The Flash",
];

pub const COMEDY_SERIES: &[&str] = &[
    "The Office",
    "Friends",
    "How I Met Your Mother",
    "Brooklyn Nine-Nine",
    "Parks and Recreation",
    "Scrubs",
    "The Big Bang Theory",
    "Seinfeld",
    "Arrested Development",
    "Community",
];

pub const DRAMA_SERIES: &[&str] = &[
    "Game of Thrones",
    "The Crown",
    "This Is Us",
    "Lost",
    "Mad Men",
    "The Sopranos",
    "House of Cards",
    "Stranger Things",
    "Dark",
    "Westworld",
];

const ACTION_MOVIES: &[&str] = &[
    "Mission Impossible",
    "John Wick",
    "Mad Max",
    "Die Hard",
    "Terminator",
];

/// Canonical titles for a genre, case-insensitive. Unknown genres get the
/// action list.
pub fn genre_titles(genre: &str) -> &'static [&'static str] {
    match genre.to_ascii_lowercase().as_str() {
        "comedy" => &[
            "The Hangover",
            "Superbad",
            "Anchorman",
            "Step Brothers",
            "Dumb and Dumber",
        ],
        "drama" => &[
            "The Pursuit of Happyness",
            "A Beautiful Mind",
            "Good Will Hunting",
            "Rain Man",
            "Philadelphia",
        ],
        "horror" => &["The Conjuring", "Insidious", "Saw", "Scream", "Halloween"],
        "romance" => &[
            "The Notebook",
            "Titanic",
            "Ghost",
            "Dirty Dancing",
            "Casablanca",
        ],
        "thriller" => &[
            "Gone Girl",
            "Se7en",
            "Zodiac",
            "The Silence of the Lambs",
            "Shutter Island",
        ],
        "animation" => &[
            "Toy Story",
            "Finding Nemo",
            "Shrek",
            "The Lion King",
            "Frozen",
        ],
        _ => ACTION_MOVIES,
    }
}

// ── Home screen ─────────────────────────────────────────────────

/// Rows of the home screen, top to bottom.
pub fn home_rows() -> Vec<Category> {
    vec![
        Category::titles("netflix-originals", "Netflix Originals", POPULAR_SERIES).large(),
        Category::titles("trending", "Trending Now", POPULAR_MOVIES),
        Category::titles("top-rated", "Top Rated Movies", TOP_RATED),
        Category::genre("action-movies", "Action Movies", "action"),
        Category::genre("comedy-movies", "Comedy Movies", "comedy"),
        Category::genre("horror-movies", "Horror Movies", "horror"),
        Category::genre("romance-movies", "Romance Movies", "romance"),
        Category::genre("thriller-movies", "Thriller Movies", "thriller"),
        Category::genre("animation-movies", "Animation Movies", "animation"),
        Category::titles("documentaries", "Documentaries", DOCUMENTARIES),
        Category::titles("popular-tv", "Popular TV Shows", POPULAR_SERIES),
        Category::titles("comedy-tv", "Comedy TV Shows", COMEDY_SERIES),
        Category::titles("drama-tv", "Drama TV Shows", DRAMA_SERIES),
    ]
}

/// Every known category, including those not on the home screen.
pub fn all_categories() -> Vec<Category> {
    let mut all = home_rows();
    all.push(Category::titles("action-tv", "Action TV Shows", ACTION_SERIES));
    all
}

/// Look up a category by key.
pub fn find(key: &str) -> Option<Category> {
    all_categories().into_iter().find(|c| c.key == key)
}
