//! Static per-city cultural data. Immutable for the life of the process.

use serde::Serialize;

#[derive(Debug, PartialEq, Serialize)]
pub struct CityContext {
    pub city: &'static str,
    pub nickname: &'static str,
    pub key_industries: &'static [&'static str],
    pub cultural_tone: &'static str,
    pub local_events: &'static [&'static str],
    pub language_preference: &'static str,
    pub market_sentiment: &'static str,
    pub salary_expectations: &'static str,
    pub work_culture: &'static str,
    pub key_companies: &'static [&'static str],
    pub hashtags: &'static [&'static str],
    pub local_references: &'static [&'static str],
}

/// Local-language words used for the regional version.
#[derive(Debug, PartialEq, Serialize)]
pub struct RegionalPhrases {
    pub hello: &'static str,
    pub opportunity: &'static str,
    pub career: &'static str,
    pub success: &'static str,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum Relevance {
    High,
    Medium,
}

#[derive(Debug, PartialEq, Serialize)]
pub struct LocalEvent {
    pub name: &'static str,
    pub date: &'static str,
    pub relevance: Relevance,
}

pub static CITY_CONTEXTS: &[CityContext] = &[
    CityContext {
        city: "Bangalore",
        nickname: "Silicon Valley of India",
        key_industries: &["IT Services", "Startups", "R&D", "Biotechnology"],
        cultural_tone: "Tech-forward, innovation-focused, cosmopolitan",
        local_events: &[
            "Bangalore Tech Summit",
            "Global Innovation Summit",
            "India Mobile Congress",
        ],
        language_preference: "English with tech jargon",
        market_sentiment: "High competition, growth-oriented, startup culture",
        salary_expectations: "High (₹12-36 LPA)",
        work_culture: "Fast-paced, flexible, innovation-driven",
        key_companies: &["Infosys", "Wipro", "TCS", "Flipkart", "Ola"],
        hashtags: &["#BangaloreTech", "#SiliconValleyOfIndia", "#NammaOoru"],
        local_references: &["Namma Metro", "UB City", "Electronic City", "Whitefield"],
    },
    CityContext {
        city: "Mumbai",
        nickname: "Financial Capital of India",
        key_industries: &["Finance", "Media", "Entertainment", "Pharmaceuticals"],
        cultural_tone: "Fast-paced, opportunity-driven, commercial",
        local_events: &[
            "Mumbai Fintech Festival",
            "Digital Marketing Summit",
            "Bombay Stock Exchange Events",
        ],
        language_preference: "English/Hindi mix, business-focused",
        market_sentiment: "Networking-focused, premium positioning, ambitious",
        salary_expectations: "Premium (₹10-22 LPA)",
        work_culture: "Hustle mentality, networking-heavy, results-oriented",
        key_companies: &["Reliance", "Tata Group", "HDFC", "Kotak Mahindra"],
        hashtags: &["#MumbaiFinance", "#MaxCity", "#BombayDreams"],
        local_references: &["Nariman Point", "BKC", "Marine Drive", "Local trains"],
    },
    CityContext {
        city: "Delhi NCR",
        nickname: "Corporate Hub of India",
        key_industries: &["Government", "Consulting", "MNCs", "Manufacturing"],
        cultural_tone: "Professional, hierarchical, power-conscious",
        local_events: &[
            "Delhi Business Summit",
            "India Leadership Conclave",
            "CII Events",
        ],
        language_preference: "Hindi/English mix, formal tone",
        market_sentiment: "Authority-respecting, status-conscious, traditional",
        salary_expectations: "Competitive (₹11-24 LPA)",
        work_culture: "Formal, hierarchy-aware, relationship-based",
        key_companies: &["HCL", "Tech Mahindra", "Maruti Suzuki", "Hero MotoCorp"],
        hashtags: &["#DelhiNCR", "#CapitalCareers", "#DilliKiDhadak"],
        local_references: &["Connaught Place", "Gurgaon", "Noida", "Metro"],
    },
    CityContext {
        city: "Hyderabad",
        nickname: "Cyberabad",
        key_industries: &["IT Services", "Biotech", "Aerospace", "Pharmaceuticals"],
        cultural_tone: "Tech-savvy, cost-conscious, traditional yet modern",
        local_events: &[
            "Hyderabad Tech Conference",
            "BioTech Summit",
            "HITEC City Events",
        ],
        language_preference: "Telugu/English mix, respectful tone",
        market_sentiment: "Value-focused, pragmatic, family-oriented",
        salary_expectations: "Value-driven (₹9-20 LPA)",
        work_culture: "Balanced, family-friendly, cost-effective",
        key_companies: &["Microsoft", "Google", "Amazon", "Facebook"],
        hashtags: &["#Cyberabad", "#HyderabadTech", "#CityOfPearls"],
        local_references: &["HITEC City", "Gachibowli", "Jubilee Hills", "Charminar"],
    },
    CityContext {
        city: "Chennai",
        nickname: "Detroit of India",
        key_industries: &["Automotive", "Manufacturing", "IT", "Healthcare"],
        cultural_tone: "Traditional yet progressive, quality-focused",
        local_events: &[
            "Chennai Auto Expo",
            "South India Tech Meet",
            "Manufacturing Summit",
        ],
        language_preference: "Tamil/English mix, respectful approach",
        market_sentiment: "Quality-focused, relationship-driven, conservative",
        salary_expectations: "Steady (₹8-18 LPA)",
        work_culture: "Methodical, quality-oriented, relationship-based",
        key_companies: &["TCS", "Cognizant", "Ford", "Hyundai"],
        hashtags: &["#ChennaiTech", "#DetroitOfIndia", "#TamilNaduTech"],
        local_references: &["OMR", "Velachery", "T.Nagar", "Marina Beach"],
    },
    CityContext {
        city: "Pune",
        nickname: "Oxford of the East",
        key_industries: &["Education", "IT", "Automotive", "Manufacturing"],
        cultural_tone: "Academic, youthful, collaborative",
        local_events: &[
            "Pune Tech Festival",
            "Education Innovation Summit",
            "Auto Expo",
        ],
        language_preference: "Marathi/English mix, academic tone",
        market_sentiment: "Learning-oriented, collaborative, student-friendly",
        salary_expectations: "Moderate (₹9-19 LPA)",
        work_culture: "Academic, collaborative, innovation-friendly",
        key_companies: &["Infosys", "TCS", "Bajaj", "Mahindra"],
        hashtags: &["#PuneTech", "#OxfordOfTheEast", "#PuneIT"],
        local_references: &["Hinjewadi", "Magarpatta", "Koregaon Park", "Deccan"],
    },
    CityContext {
        city: "Ahmedabad",
        nickname: "Manchester of India",
        key_industries: &["Textiles", "Chemicals", "Pharmaceuticals", "IT"],
        cultural_tone: "Business-minded, entrepreneurial, traditional",
        local_events: &[
            "Gujarat Business Summit",
            "Textile Expo",
            "Pharma Conference",
        ],
        language_preference: "Gujarati/English mix, business-focused",
        market_sentiment: "Entrepreneurial, cost-effective, business-oriented",
        salary_expectations: "Cost-effective (₹7-16 LPA)",
        work_culture: "Entrepreneurial, family-business oriented, frugal",
        key_companies: &["Adani Group", "Torrent", "Zydus", "Infibeam"],
        hashtags: &["#AhmedabadBusiness", "#GujaratTech", "#ManchesterOfIndia"],
        local_references: &["SG Highway", "Satellite", "Vastrapur", "Sabarmati"],
    },
    CityContext {
        city: "Kolkata",
        nickname: "Cultural Capital of India",
        key_industries: &["IT", "Finance", "Jute", "Steel"],
        cultural_tone: "Intellectual, cultural, traditional",
        local_events: &[
            "Kolkata Book Fair",
            "Bengal IT Summit",
            "Cultural Festivals",
        ],
        language_preference: "Bengali/English mix, intellectual tone",
        market_sentiment: "Intellectual, culture-appreciating, traditional",
        salary_expectations: "Modest (₹6-15 LPA)",
        work_culture: "Intellectual, discussion-oriented, culture-rich",
        key_companies: &["TCS", "Wipro", "ITC", "Coal India"],
        hashtags: &["#KolkataTech", "#CulturalCapital", "#CityOfJoy"],
        local_references: &["Salt Lake", "New Town", "Park Street", "Howrah Bridge"],
    },
];

pub static REGIONAL_PHRASES: &[(&str, RegionalPhrases)] = &[
    (
        "Bangalore",
        RegionalPhrases {
            hello: "Namaskara",
            opportunity: "Avakasha",
            career: "Vyavasaya",
            success: "Safalate",
        },
    ),
    (
        "Mumbai",
        RegionalPhrases {
            hello: "Namaskar",
            opportunity: "Mauka",
            career: "Career",
            success: "Safalta",
        },
    ),
    (
        "Delhi NCR",
        RegionalPhrases {
            hello: "Namaste",
            opportunity: "Mauka",
            career: "Career",
            success: "Safalta",
        },
    ),
    (
        "Hyderabad",
        RegionalPhrases {
            hello: "Namaste",
            opportunity: "Avakasam",
            career: "Udyogam",
            success: "Vijayam",
        },
    ),
    (
        "Chennai",
        RegionalPhrases {
            hello: "Vanakkam",
            opportunity: "Vaaipu",
            career: "Thozhil",
            success: "Vetri",
        },
    ),
    (
        "Pune",
        RegionalPhrases {
            hello: "Namaskar",
            opportunity: "Sandhi",
            career: "Vyavasaya",
            success: "Yash",
        },
    ),
];

pub static LOCAL_EVENTS: &[(&str, &[LocalEvent])] = &[
    (
        "Bangalore",
        &[
            LocalEvent {
                name: "Bangalore Tech Summit",
                date: "November 2025",
                relevance: Relevance::High,
            },
            LocalEvent {
                name: "Global Innovation Summit",
                date: "December 2025",
                relevance: Relevance::Medium,
            },
            LocalEvent {
                name: "India Mobile Congress",
                date: "October 2025",
                relevance: Relevance::High,
            },
        ],
    ),
    (
        "Mumbai",
        &[
            LocalEvent {
                name: "Mumbai Fintech Festival",
                date: "October 2025",
                relevance: Relevance::High,
            },
            LocalEvent {
                name: "Digital Marketing Summit",
                date: "November 2025",
                relevance: Relevance::Medium,
            },
        ],
    ),
    (
        "Delhi NCR",
        &[
            LocalEvent {
                name: "Delhi Business Summit",
                date: "December 2025",
                relevance: Relevance::High,
            },
            LocalEvent {
                name: "India Leadership Conclave",
                date: "January 2026",
                relevance: Relevance::Medium,
            },
        ],
    ),
];

/// Course → industries that make a local hook relevant.
pub static COURSE_INDUSTRIES: &[(&str, &[&str])] = &[
    ("AI/ML", &["IT Services", "Startups", "R&D"]),
    ("Data Science", &["IT Services", "Finance", "E-commerce"]),
    ("Generative AI", &["IT Services", "Media", "Entertainment"]),
    ("MSc Finance", &["Finance", "Banking", "Fintech"]),
];

/// Case-insensitive on the trimmed name, like the market lookup. Callers
/// should pass `ctx.city` onward so the other tables see the canonical key.
pub fn city_context(city: &str) -> Option<&'static CityContext> {
    let city = city.trim();
    CITY_CONTEXTS.iter().find(|c| c.city.eq_ignore_ascii_case(city))
}

pub fn regional_phrases(city: &str) -> Option<&'static RegionalPhrases> {
    REGIONAL_PHRASES
        .iter()
        .find(|(name, _)| *name == city)
        .map(|(_, phrases)| phrases)
}

pub fn local_events(city: &str) -> &'static [LocalEvent] {
    LOCAL_EVENTS
        .iter()
        .find(|(name, _)| *name == city)
        .map(|(_, events)| *events)
        .unwrap_or(&[])
}
