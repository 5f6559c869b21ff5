//! Regional-language hints for the prompt builder.

struct RegionalHint {
    city: &'static str,
    greeting: &'static str,
    phrases: [&'static str; 3],
    closing: &'static str,
    cultural: &'static str,
}

const HINTS: &[RegionalHint] = &[
    RegionalHint {
        city: "Bangalore",
        greeting: "Namaskara",
        phrases: [
            "ಕೆಲಸ (kelasa - work)",
            "ಭವಿಷ್ಯ (bhavishya - future)",
            "ಯಶಸ್ಸು (yashassu - success)",
        ],
        closing: "Dhanyawadagalu",
        cultural: "Silicon Valley of India, Tech hub, IT capital",
    },
    RegionalHint {
        city: "Mumbai",
        greeting: "Namaste",
        phrases: [
            "काम (kaam - work)",
            "सफलता (safalta - success)",
            "भविष्य (bhavishya - future)",
        ],
        closing: "Dhanyawad",
        cultural: "Financial capital, Bollywood, Dreams city",
    },
    RegionalHint {
        city: "Delhi NCR",
        greeting: "Namaste",
        phrases: [
            "नौकरी (naukri - job)",
            "कैरियर (career)",
            "तरक्की (tarakki - progress)",
        ],
        closing: "Dhanyawad",
        cultural: "Capital region, Government hub, Corporate center",
    },
    RegionalHint {
        city: "Hyderabad",
        greeting: "Namaste",
        phrases: [
            "పని (pani - work)",
            "భవిష్యత్తు (bhavishyattu - future)",
            "విజయం (vijayam - success)",
        ],
        closing: "Dhanyawadamulu",
        cultural: "Cyberabad, HITEC City, Pharma hub",
    },
    RegionalHint {
        city: "Chennai",
        greeting: "Vanakkam",
        phrases: [
            "வேலை (velai - work)",
            "எதிர்காலம் (ethirkaalam - future)",
            "வெற்றி (vetri - success)",
        ],
        closing: "Nandri",
        cultural: "Detroit of India, IT corridor, Cultural capital",
    },
    RegionalHint {
        city: "Pune",
        greeting: "Namaskar",
        phrases: [
            "काम (kaam - work)",
            "यश (yash - success)",
            "प्रगती (pragati - progress)",
        ],
        closing: "Dhanyawad",
        cultural: "Oxford of the East, IT hub, Cultural center",
    },
    RegionalHint {
        city: "Kolkata",
        greeting: "Namaskar",
        phrases: [
            "কাজ (kaaj - work)",
            "ভবিষ্যৎ (bhobishyot - future)",
            "সাফল্য (shafolyo - success)",
        ],
        closing: "Dhonnobad",
        cultural: "Cultural capital, City of Joy, Educational hub",
    },
];

/// Cities without an entry borrow this one.
const DEFAULT_HINT_CITY: &str = "Mumbai";

const REGIONAL_LANGUAGES: &[&str] = &["Kannada", "Hindi", "Telugu", "Tamil", "Marathi", "Bengali"];

fn hint_for(city: &str) -> &'static RegionalHint {
    HINTS
        .iter()
        .find(|h| h.city.eq_ignore_ascii_case(city.trim()))
        .or_else(|| HINTS.iter().find(|h| h.city == DEFAULT_HINT_CITY))
        .unwrap_or(&HINTS[0])
}

/// Prompt fragment describing how much regional flavour to use.
/// Only a language choice that pairs English with a regional language gets
/// greetings and native phrases.
pub fn regional_elements(city: &str, language: &str) -> String {
    let hint = hint_for(city);
    let bilingual = language.contains("English")
        && REGIONAL_LANGUAGES.iter().any(|lang| language.contains(lang));

    if bilingual {
        format!(
            "{} greeting, incorporate phrases like {}, mention {}, use {} for closing",
            hint.greeting,
            hint.phrases[..2].join(", "),
            hint.cultural,
            hint.closing
        )
    } else {
        format!("Mention {}, use professional English tone", hint.cultural)
    }
}
