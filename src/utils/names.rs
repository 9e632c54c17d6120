//! Name, city and mail-domain pools used to fill customer contact fields.

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Locale {
    English,
    French,
    German,
    Spanish,
    Italian,
}

pub struct CountryProfile {
    pub code: &'static str,
    pub weight: f64,
    pub locale: Locale,
    pub cities: &'static [&'static str],
}

pub static COUNTRIES: [CountryProfile; 8] = [
    CountryProfile {
        code: "US",
        weight: 0.35,
        locale: Locale::English,
        cities: &[
            "New York", "Los Angeles", "Chicago", "Houston", "Phoenix", "Seattle", "Denver",
            "Boston", "Austin", "Atlanta",
        ],
    },
    CountryProfile {
        code: "FR",
        weight: 0.15,
        locale: Locale::French,
        cities: &[
            "Paris", "Lyon", "Marseille", "Toulouse", "Nice", "Nantes", "Bordeaux", "Lille",
        ],
    },
    CountryProfile {
        code: "DE",
        weight: 0.15,
        locale: Locale::German,
        cities: &[
            "Berlin", "Hamburg", "Munich", "Cologne", "Frankfurt", "Stuttgart", "Leipzig",
            "Dresden",
        ],
    },
    CountryProfile {
        code: "GB",
        weight: 0.10,
        locale: Locale::English,
        cities: &[
            "London", "Manchester", "Birmingham", "Leeds", "Glasgow", "Bristol", "Liverpool",
        ],
    },
    CountryProfile {
        code: "ES",
        weight: 0.08,
        locale: Locale::Spanish,
        cities: &[
            "Madrid", "Barcelona", "Valencia", "Seville", "Bilbao", "Malaga", "Zaragoza",
        ],
    },
    CountryProfile {
        code: "IT",
        weight: 0.07,
        locale: Locale::Italian,
        cities: &["Rome", "Milan", "Naples", "Turin", "Florence", "Bologna", "Venice"],
    },
    CountryProfile {
        code: "CA",
        weight: 0.06,
        locale: Locale::English,
        cities: &["Toronto", "Montreal", "Vancouver", "Calgary", "Ottawa", "Edmonton"],
    },
    CountryProfile {
        code: "AU",
        weight: 0.04,
        locale: Locale::English,
        cities: &["Sydney", "Melbourne", "Brisbane", "Perth", "Adelaide", "Canberra"],
    },
];

pub const EMAIL_DOMAINS: [&str; 6] = [
    "gmail.com",
    "yahoo.com",
    "hotmail.com",
    "outlook.com",
    "proton.me",
    "icloud.com",
];

impl Locale {
    pub fn first_names(&self) -> &'static [&'static str] {
        match self {
            Locale::English => &[
                "James", "Mary", "John", "Patricia", "Robert", "Jennifer", "Michael", "Linda",
                "William", "Elizabeth", "David", "Susan", "Emily", "Daniel", "Olivia", "Jack",
            ],
            Locale::French => &[
                "Jean", "Marie", "Pierre", "Camille", "Louis", "Chloe", "Lucas", "Manon", "Hugo",
                "Lea", "Antoine", "Juliette",
            ],
            Locale::German => &[
                "Lukas", "Anna", "Felix", "Lena", "Jonas", "Hannah", "Paul", "Sophie", "Max",
                "Laura", "Jan", "Katharina",
            ],
            Locale::Spanish => &[
                "Alejandro", "Lucia", "Pablo", "Sofia", "Javier", "Carmen", "Diego", "Elena",
                "Sergio", "Paula", "Mateo", "Isabel",
            ],
            Locale::Italian => &[
                "Marco", "Giulia", "Luca", "Francesca", "Matteo", "Chiara", "Andrea", "Sara",
                "Lorenzo", "Alessia",
            ],
        }
    }

    pub fn last_names(&self) -> &'static [&'static str] {
        match self {
            Locale::English => &[
                "Smith", "Johnson", "Williams", "Brown", "Jones", "Miller", "Davis", "Wilson",
                "Taylor", "Anderson", "Thomas", "Moore", "Clark", "Walker", "Young", "King",
            ],
            Locale::French => &[
                "Martin", "Bernard", "Dubois", "Thomas", "Robert", "Richard", "Petit", "Durand",
                "Leroy", "Moreau", "Simon", "Laurent",
            ],
            Locale::German => &[
                "Mueller", "Schmidt", "Schneider", "Fischer", "Weber", "Meyer", "Wagner",
                "Becker", "Schulz", "Hoffmann", "Koch", "Richter",
            ],
            Locale::Spanish => &[
                "Garcia", "Rodriguez", "Gonzalez", "Fernandez", "Lopez", "Martinez", "Sanchez",
                "Perez", "Gomez", "Martin", "Jimenez", "Ruiz",
            ],
            Locale::Italian => &[
                "Rossi", "Russo", "Ferrari", "Esposito", "Bianchi", "Romano", "Colombo",
                "Ricci", "Marino", "Greco",
            ],
        }
    }
}

/// `first.last@domain`, lower-cased with spaces and apostrophes dropped.
pub fn email_address(first_name: &str, last_name: &str, domain: &str) -> String {
    let clean = |s: &str| {
        s.chars()
            .filter(|c| c.is_ascii_alphanumeric() || *c == '-')
            .collect::<String>()
            .to_ascii_lowercase()
    };
    format!("{}.{}@{}", clean(first_name), clean(last_name), domain)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_country_weights_sum_to_one() {
        let total: f64 = COUNTRIES.iter().map(|c| c.weight).sum();
        assert!((total - 1.0).abs() < 1e-9);
        assert!(COUNTRIES.iter().all(|c| !c.cities.is_empty()));
    }

    #[test]
    fn test_email_address() {
        assert_eq!(
            email_address("Mary Ann", "O'Brien", "gmail.com"),
            "maryann.obrien@gmail.com"
        );
    }
}
