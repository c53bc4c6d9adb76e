use crate::catalog::{Audience, Category, PriceModel, Stage};

/// Labels for every `Category` value.
///
/// One field per enum value: a bundle that leaves a category out does not
/// compile.
#[derive(Debug, Clone)]
pub struct CategoryLabels {
    pub gamification: &'static str,
    pub content_creation: &'static str,
    pub management: &'static str,
    pub assessment: &'static str,
    pub collaboration: &'static str,
    pub other: &'static str,
}

/// Labels for every `Stage` value.
#[derive(Debug, Clone)]
pub struct StageLabels {
    pub early_childhood: &'static str,
    pub primary: &'static str,
    pub secondary: &'static str,
    pub upper_secondary: &'static str,
    pub vocational: &'static str,
    pub university: &'static str,
}

/// Labels for every `Audience` value.
#[derive(Debug, Clone)]
pub struct AudienceLabels {
    pub teacher: &'static str,
    pub student: &'static str,
    pub both: &'static str,
}

/// Labels for every `PriceModel` value.
#[derive(Debug, Clone)]
pub struct PriceLabels {
    pub free: &'static str,
    pub freemium: &'static str,
    pub paid: &'static str,
}

/// All localized user-facing strings for a language
#[derive(Debug, Clone)]
pub struct LanguageStrings {
    // ==================== Enum Labels ====================
    pub categories: CategoryLabels,
    pub stages: StageLabels,
    pub audiences: AudienceLabels,
    pub prices: PriceLabels,

    // ==================== Listing ====================
    pub app_title: &'static str,
    pub search_placeholder: &'static str,
    pub clear_filters: &'static str,

    /// Placeholders: {count}
    pub results_count: &'static str,
    pub no_results: &'static str,

    pub filter_category: &'static str,
    pub filter_stage: &'static str,
    pub filter_role: &'static str,
    pub filter_price: &'static str,

    // ==================== Detail View ====================
    pub website_label: &'static str,
    pub features_title: &'static str,

    /// Placeholders: {age}
    pub min_age: &'static str,
    pub no_age_restriction: &'static str,

    // ==================== Review ====================
    pub review_loading: &'static str,
    pub review_error: &'static str,
    pub review_title: &'static str,
    pub summary_title: &'static str,
    pub teacher_tip_title: &'static str,
    pub student_activity_title: &'static str,
    pub pros_title: &'static str,
    pub cons_title: &'static str,
    pub privacy_title: &'static str,
    pub gdpr_compliant: &'static str,
    pub gdpr_not_compliant: &'static str,
    pub data_collected_title: &'static str,
    pub age_warning_title: &'static str,

    // ==================== Export ====================
    pub export_button: &'static str,
    pub export_review_missing: &'static str,

    /// Placeholders: {error}
    pub export_failed: &'static str,

    /// Placeholders: {date}
    pub generated_on: &'static str,
}

impl LanguageStrings {
    pub fn category_label(&self, category: Category) -> &'static str {
        let labels = &self.categories;
        match category {
            Category::Gamification => labels.gamification,
            Category::ContentCreation => labels.content_creation,
            Category::Management => labels.management,
            Category::Assessment => labels.assessment,
            Category::Collaboration => labels.collaboration,
            Category::Other => labels.other,
        }
    }

    pub fn stage_label(&self, stage: Stage) -> &'static str {
        let labels = &self.stages;
        match stage {
            Stage::EarlyChildhood => labels.early_childhood,
            Stage::Primary => labels.primary,
            Stage::Secondary => labels.secondary,
            Stage::UpperSecondary => labels.upper_secondary,
            Stage::Vocational => labels.vocational,
            Stage::University => labels.university,
        }
    }

    pub fn audience_label(&self, audience: Audience) -> &'static str {
        let labels = &self.audiences;
        match audience {
            Audience::Teacher => labels.teacher,
            Audience::Student => labels.student,
            Audience::Both => labels.both,
        }
    }

    pub fn price_label(&self, price: PriceModel) -> &'static str {
        let labels = &self.prices;
        match price {
            PriceModel::Free => labels.free,
            PriceModel::Freemium => labels.freemium,
            PriceModel::Paid => labels.paid,
        }
    }

    pub fn format_results_count(&self, count: usize) -> String {
        self.results_count.replace("{count}", &count.to_string())
    }

    pub fn format_min_age(&self, min_age: Option<u8>) -> String {
        match min_age {
            Some(age) => self.min_age.replace("{age}", &age.to_string()),
            None => self.no_age_restriction.to_string(),
        }
    }
}

// ==================== Spanish Strings ====================

pub const SPANISH_STRINGS: LanguageStrings = LanguageStrings {
    categories: CategoryLabels {
        gamification: "Gamificación",
        content_creation: "Creación de contenido",
        management: "Gestión del aula",
        assessment: "Evaluación",
        collaboration: "Colaboración",
        other: "Otros",
    },
    stages: StageLabels {
        early_childhood: "Educación Infantil",
        primary: "Educación Primaria",
        secondary: "ESO",
        upper_secondary: "Bachillerato",
        vocational: "Formación Profesional",
        university: "Universidad",
    },
    audiences: AudienceLabels {
        teacher: "Docentes",
        student: "Alumnado",
        both: "Docentes y alumnado",
    },
    prices: PriceLabels {
        free: "Gratuita",
        freemium: "Freemium",
        paid: "De pago",
    },

    app_title: "Directorio de Apps Educativas",
    search_placeholder: "Buscar aplicaciones...",
    clear_filters: "Limpiar filtros",
    results_count: "{count} aplicaciones encontradas",
    no_results: "No se han encontrado aplicaciones con estos filtros.",
    filter_category: "Categoría",
    filter_stage: "Etapa educativa",
    filter_role: "Destinatarios",
    filter_price: "Precio",

    website_label: "Sitio web",
    features_title: "Características",
    min_age: "Edad mínima: {age} años",
    no_age_restriction: "Sin restricción de edad declarada",

    review_loading: "Generando análisis con IA...",
    review_error: "No se ha podido generar el análisis. Vuelve a abrir la aplicación para intentarlo de nuevo.",
    review_title: "Análisis pedagógico",
    summary_title: "Resumen",
    teacher_tip_title: "Consejo para docentes",
    student_activity_title: "Actividad para el alumnado",
    pros_title: "Ventajas",
    cons_title: "Inconvenientes",
    privacy_title: "Privacidad y RGPD",
    gdpr_compliant: "Cumple el RGPD",
    gdpr_not_compliant: "No consta que cumpla el RGPD",
    data_collected_title: "Datos recogidos",
    age_warning_title: "Advertencia de edad",

    export_button: "Descargar informe",
    export_review_missing: "Informe sin análisis de IA (no disponible en el momento de la exportación)",
    export_failed: "No se ha podido generar el informe: {error}",
    generated_on: "Generado el {date}",
};

// ==================== Basque Strings ====================

pub const BASQUE_STRINGS: LanguageStrings = LanguageStrings {
    categories: CategoryLabels {
        gamification: "Gamifikazioa",
        content_creation: "Eduki-sorkuntza",
        management: "Gela-kudeaketa",
        assessment: "Ebaluazioa",
        collaboration: "Lankidetza",
        other: "Besteak",
    },
    stages: StageLabels {
        early_childhood: "Haur Hezkuntza",
        primary: "Lehen Hezkuntza",
        secondary: "DBH",
        upper_secondary: "Batxilergoa",
        vocational: "Lanbide Heziketa",
        university: "Unibertsitatea",
    },
    audiences: AudienceLabels {
        teacher: "Irakasleak",
        student: "Ikasleak",
        both: "Irakasleak eta ikasleak",
    },
    prices: PriceLabels {
        free: "Doakoa",
        freemium: "Freemium",
        paid: "Ordainpekoa",
    },

    app_title: "Hezkuntza Aplikazioen Direktorioa",
    search_placeholder: "Aplikazioak bilatu...",
    clear_filters: "Iragazkiak garbitu",
    results_count: "{count} aplikazio aurkitu dira",
    no_results: "Ez da iragazki hauekin bat datorren aplikaziorik aurkitu.",
    filter_category: "Kategoria",
    filter_stage: "Hezkuntza-etapa",
    filter_role: "Hartzaileak",
    filter_price: "Prezioa",

    website_label: "Webgunea",
    features_title: "Ezaugarriak",
    min_age: "Gutxieneko adina: {age} urte",
    no_age_restriction: "Ez da adin-mugarik adierazi",

    review_loading: "IA bidezko analisia sortzen...",
    review_error: "Ezin izan da analisia sortu. Ireki berriro aplikazioa berriz saiatzeko.",
    review_title: "Analisi pedagogikoa",
    summary_title: "Laburpena",
    teacher_tip_title: "Irakasleentzako aholkua",
    student_activity_title: "Ikasleentzako jarduera",
    pros_title: "Abantailak",
    cons_title: "Desabantailak",
    privacy_title: "Pribatutasuna eta DBEO",
    gdpr_compliant: "DBEO betetzen du",
    gdpr_not_compliant: "Ez dago jasota DBEO betetzen duenik",
    data_collected_title: "Bildutako datuak",
    age_warning_title: "Adinari buruzko abisua",

    export_button: "Txostena deskargatu",
    export_review_missing: "IA analisirik gabeko txostena (ez zegoen eskuragarri esportatzean)",
    export_failed: "Ezin izan da txostena sortu: {error}",
    generated_on: "Sortze-data: {date}",
};
