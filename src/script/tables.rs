// @module: Built-in narration tables

/// Comment translations, English phrase to Turkish narration.
///
/// The table is an ordered slice on purpose: substring fallback matching
/// walks it front to back, so the first entry wins when several keys are
/// substrings of the same annotation.
pub const COMMENT_TRANSLATIONS: &[(&str, &str)] = &[
    ("Verify we're on the login page", "Giriş sayfasında olduğumuzu doğruluyoruz"),
    ("Fill in login form", "Giriş formunu dolduruyoruz"),
    ("Submit login form", "Giriş formunu gönderiyoruz"),
    ("Wait for redirect to dashboard", "Dashboard'a yönlendirmeyi bekliyoruz"),
    ("Login first", "Önce giriş yapıyoruz"),
    ("Wait for dashboard to load", "Dashboard'ın yüklenmesini bekliyoruz"),
    ("Navigate to Patients page", "Hastalar sayfasına gidiyoruz"),
    ("Navigate to Departments page", "Departmanlar sayfasına gidiyoruz"),
    ("Click on \"Yeni Hasta\" button", "\"Yeni Hasta\" butonuna tıklıyoruz"),
    ("Click on \"Yeni Departman\" button", "\"Yeni Departman\" butonuna tıklıyoruz"),
    ("Fill in patient form", "Hasta formunu dolduruyoruz"),
    ("Fill in department form", "Departman formunu dolduruyoruz"),
    ("Submit the form", "Formu gönderiyoruz"),
    ("Wait for modal to close and patient to be added", "Modal'ın kapanmasını ve hastanın eklenmesini bekliyoruz"),
    ("Wait for modal to close and department to be added", "Modal'ın kapanmasını ve departmanın eklenmesini bekliyoruz"),
];

/// Action verb explanations. Exact key match only, no substring fallback;
/// verbs without an entry produce no cue.
pub const ACTION_EXPLANATIONS: &[(&str, &str)] = &[
    ("visit", "Sayfayı ziyaret ediyoruz"),
    ("get", "Element seçiyoruz"),
    ("type", "Metin yazıyoruz"),
    ("click", "Tıklıyoruz"),
    ("contains", "İçeriği kontrol ediyoruz"),
    ("should", "Doğrulama yapıyoruz"),
    ("wait", "Bekliyoruz"),
    ("select", "Seçim yapıyoruz"),
];

/// Hand-authored steps for the static cue source, with per-step durations
/// in seconds. Used when source-driven extraction is too noisy for
/// narration quality.
pub const STATIC_STEPS: &[(&str, f64)] = &[
    ("Giriş yapılıyor", 3.0),
    ("E-posta adresi giriliyor", 2.0),
    ("Şifre giriliyor", 2.0),
    ("Giriş butonuna tıklanıyor", 3.0),
    ("Dashboard sayfasına yönlendiriliyor", 3.0),
    ("Doktorlar sayfasına gidiliyor", 3.0),
    ("Yeni doktor butonuna tıklanıyor", 2.0),
    ("Doktor adı giriliyor", 2.0),
    ("Doktor e-posta adresi giriliyor", 2.0),
    ("Doktor telefon numarası giriliyor", 2.0),
    ("Doktor uzmanlık alanı giriliyor", 2.0),
    ("Departman seçiliyor", 2.0),
    ("Form gönderiliyor", 4.0),
    ("Doktor başarıyla eklendi", 3.0),
];

/// Translate an inline annotation. Exact lookup first, then the first
/// table entry whose key is a case-insensitive substring of the annotation;
/// unmatched annotations pass through unmodified.
pub fn translate_comment(comment: &str) -> String {
    for (english, turkish) in COMMENT_TRANSLATIONS {
        if *english == comment {
            return (*turkish).to_string();
        }
    }

    let comment_lower = comment.to_lowercase();
    for (english, turkish) in COMMENT_TRANSLATIONS {
        if comment_lower.contains(&english.to_lowercase()) {
            return (*turkish).to_string();
        }
    }

    comment.to_string()
}

/// Explain a recognized action verb. Exact key match only.
pub fn explain_action(verb: &str) -> Option<&'static str> {
    ACTION_EXPLANATIONS.iter()
        .find(|(key, _)| *key == verb)
        .map(|(_, explanation)| *explanation)
}
