//! Fixed prompt-string tables for the supported languages.
//!
//! The conversation engine picks replies from these tables per locale; an
//! unrecognized language tag falls back to English. Catalog management is
//! out of scope — the tables are compiled in.

use crate::loan::PaymentBreakdown;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Locale {
    #[default]
    En,
    Es,
    Fr,
}

impl Locale {
    /// Map a language tag ("en", "es-MX", "fr_CA", ...) to a supported
    /// locale by its primary subtag. Unrecognized tags fall back to English.
    pub fn from_tag(tag: &str) -> Self {
        let primary = tag
            .split(['-', '_'])
            .next()
            .unwrap_or("")
            .to_ascii_lowercase();
        match primary.as_str() {
            "es" => Locale::Es,
            "fr" => Locale::Fr,
            _ => Locale::En,
        }
    }

    /// English name of the language, used in the gateway prompt.
    pub fn language_name(&self) -> &'static str {
        match self {
            Locale::En => "English",
            Locale::Es => "Spanish",
            Locale::Fr => "French",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PromptKey {
    Greeting,
    PropertyPrice,
    DownPayment,
    InterestRate,
    LoanTerm,
    InvalidPrice,
    InvalidDownPayment,
    InvalidRate,
    InvalidTerm,
    HelpPropertyPrice,
    HelpDownPayment,
    HelpInterestRate,
    HelpLoanTerm,
    DownloadReady,
    Support,
    HumanSupport,
    NoSupport,
    ThankYou,
    Goodbye,
    Clarify,
    Fallback,
}

pub fn prompt(locale: Locale, key: PromptKey) -> &'static str {
    match locale {
        Locale::En => en(key),
        Locale::Es => es(key),
        Locale::Fr => fr(key),
    }
}

fn en(key: PromptKey) -> &'static str {
    use PromptKey::*;
    match key {
        Greeting => "👋 Hello! I'm here to help you with mortgage calculations. Want to start?",
        PropertyPrice => "Great! What's the home price you're looking at?",
        DownPayment => "Got it! How much are you planning for a down payment?",
        InterestRate => "Noted. What interest rate are you expecting? (e.g., 6.5%)",
        LoanTerm => "Thanks! Over how many years would you like to take the loan?",
        InvalidPrice => "Please enter a valid property price (e.g., $400,000)",
        InvalidDownPayment => {
            "Please enter a valid down payment amount (less than property price)"
        }
        InvalidRate => "Please enter a valid interest rate (e.g., 6.5%)",
        InvalidTerm => "Please enter a valid loan term in years (e.g., 30)",
        HelpPropertyPrice => {
            "I need the total price of the home you want to buy. For example: $400,000"
        }
        HelpDownPayment => "I need the amount you'll pay upfront. For example: $80,000",
        HelpInterestRate => "I need the annual interest rate. For example: 6.5%",
        HelpLoanTerm => "I need the loan duration in years. For example: 30",
        DownloadReady => {
            "Perfect! I've prepared your mortgage breakdown. Check your email or download it here."
        }
        Support => "I'd be happy to connect you with our mortgage experts. Would you like to speak with a human advisor?",
        HumanSupport => "Great! I'm connecting you with our mortgage advisor. They'll be with you shortly. In the meantime, you can also call us at (415) 523-8837.",
        NoSupport => {
            "No problem! Feel free to reach out anytime. Is there anything else I can help you with?"
        }
        ThankYou => {
            "Thank you for using our mortgage calculator! Is there anything else I can help you with?"
        }
        Goodbye => "No problem! Feel free to come back anytime. Have a great day!",
        Clarify => "I'm here to help with mortgage calculations. Would you like to start? (Yes/No)",
        Fallback => "I'm not sure I understood that. Could you please clarify?",
    }
}

fn es(key: PromptKey) -> &'static str {
    use PromptKey::*;
    match key {
        Greeting => "👋 ¡Hola! Estoy aquí para ayudarte con cálculos hipotecarios. ¿Quieres empezar?",
        PropertyPrice => "¡Genial! ¿Cuál es el precio de la casa que estás viendo?",
        DownPayment => "¡Entendido! ¿Cuánto planeas para el pago inicial?",
        InterestRate => "Anotado. ¿Qué tasa de interés esperas? (ej., 6.5%)",
        LoanTerm => "¡Gracias! ¿En cuántos años te gustaría tomar el préstamo?",
        InvalidPrice => "Por favor ingresa un precio de propiedad válido (ej., $400,000)",
        InvalidDownPayment => {
            "Por favor ingresa un monto de pago inicial válido (menos que el precio de la propiedad)"
        }
        InvalidRate => "Por favor ingresa una tasa de interés válida (ej., 6.5%)",
        InvalidTerm => "Por favor ingresa un plazo de préstamo válido en años (ej., 30)",
        HelpPropertyPrice => {
            "Necesito el precio total de la casa que quieres comprar. Por ejemplo: $400,000"
        }
        HelpDownPayment => "Necesito el monto que pagarás por adelantado. Por ejemplo: $80,000",
        HelpInterestRate => "Necesito la tasa de interés anual. Por ejemplo: 6.5%",
        HelpLoanTerm => "Necesito la duración del préstamo en años. Por ejemplo: 30",
        DownloadReady => {
            "¡Perfecto! He preparado tu desglose hipotecario. Revisa tu email o descárgalo aquí."
        }
        Support => "Me encantaría conectarte con nuestros expertos hipotecarios. ¿Te gustaría hablar con un asesor humano?",
        HumanSupport => "¡Genial! Te estoy conectando con nuestro asesor hipotecario. Estarán contigo en breve. Mientras tanto, también puedes llamarnos al (415) 523-8837.",
        NoSupport => {
            "No hay problema. No dudes en contactarnos en cualquier momento. ¿Hay algo más en lo que pueda ayudarte?"
        }
        ThankYou => {
            "¡Gracias por usar nuestra calculadora hipotecaria! ¿Hay algo más en lo que pueda ayudarte?"
        }
        Goodbye => "No hay problema. No dudes en volver en cualquier momento. ¡Que tengas un gran día!",
        Clarify => "Estoy aquí para ayudar con cálculos hipotecarios. ¿Te gustaría empezar? (Sí/No)",
        Fallback => "No estoy seguro de haber entendido eso. ¿Podrías aclarar?",
    }
}

fn fr(key: PromptKey) -> &'static str {
    use PromptKey::*;
    match key {
        Greeting => "👋 Bonjour ! Je suis ici pour vous aider avec les calculs hypothécaires. Voulez-vous commencer ?",
        PropertyPrice => "Parfait ! Quel est le prix de la maison que vous regardez ?",
        DownPayment => "Compris ! Combien prévoyez-vous pour l'acompte ?",
        InterestRate => "Noté. Quel taux d'intérêt attendez-vous ? (ex., 6.5%)",
        LoanTerm => "Merci ! Sur combien d'années souhaitez-vous prendre le prêt ?",
        InvalidPrice => "Veuillez entrer un prix de propriété valide (ex., $400,000)",
        InvalidDownPayment => {
            "Veuillez entrer un montant d'acompte valide (moins que le prix de la propriété)"
        }
        InvalidRate => "Veuillez entrer un taux d'intérêt valide (ex., 6.5%)",
        InvalidTerm => "Veuillez entrer une durée de prêt valide en années (ex., 30)",
        HelpPropertyPrice => {
            "J'ai besoin du prix total de la maison que vous voulez acheter. Par exemple : $400,000"
        }
        HelpDownPayment => "J'ai besoin du montant que vous paierez d'avance. Par exemple : $80,000",
        HelpInterestRate => "J'ai besoin du taux d'intérêt annuel. Par exemple : 6.5%",
        HelpLoanTerm => "J'ai besoin de la durée du prêt en années. Par exemple : 30",
        DownloadReady => {
            "Parfait ! J'ai préparé votre répartition hypothécaire. Vérifiez votre email ou téléchargez-la ici."
        }
        Support => "Je serais ravi de vous connecter avec nos experts hypothécaires. Souhaitez-vous parler avec un conseiller humain ?",
        HumanSupport => "Parfait ! Je vous connecte avec notre conseiller hypothécaire. Ils seront avec vous sous peu. En attendant, vous pouvez aussi nous appeler au (415) 523-8837.",
        NoSupport => {
            "Aucun problème. N'hésitez pas à nous contacter à tout moment. Y a-t-il autre chose que je puisse faire pour vous ?"
        }
        ThankYou => {
            "Merci d'avoir utilisé notre calculateur hypothécaire ! Y a-t-il autre chose que je puisse faire pour vous ?"
        }
        Goodbye => "Aucun problème. N'hésitez pas à revenir à tout moment. Passez une excellente journée !",
        Clarify => "Je suis ici pour aider avec les calculs hypothécaires. Voulez-vous commencer ? (Oui/Non)",
        Fallback => "Je ne suis pas sûr d'avoir compris cela. Pourriez-vous clarifier ?",
    }
}

struct BreakdownLabels {
    calculating: &'static str,
    monthly_payment: &'static str,
    breakdown: &'static str,
    loan_amount: &'static str,
    total_interest: &'static str,
    total_payment: &'static str,
    next_steps: &'static str,
}

fn breakdown_labels(locale: Locale) -> &'static BreakdownLabels {
    match locale {
        Locale::En => &BreakdownLabels {
            calculating: "Calculating your monthly payment...",
            monthly_payment: "Your estimated monthly payment is",
            breakdown: "Breakdown:",
            loan_amount: "Loan Amount",
            total_interest: "Total Interest",
            total_payment: "Total Payment",
            next_steps: "Would you like to download a breakdown or recalculate?",
        },
        Locale::Es => &BreakdownLabels {
            calculating: "Calculando tu pago mensual...",
            monthly_payment: "Tu pago mensual estimado es",
            breakdown: "Desglose:",
            loan_amount: "Monto del Préstamo",
            total_interest: "Interés Total",
            total_payment: "Pago Total",
            next_steps: "¿Te gustaría descargar un desglose o recalcular?",
        },
        Locale::Fr => &BreakdownLabels {
            calculating: "Calcul de votre paiement mensuel...",
            monthly_payment: "Votre paiement mensuel estimé est",
            breakdown: "Répartition :",
            loan_amount: "Montant du Prêt",
            total_interest: "Intérêt Total",
            total_payment: "Paiement Total",
            next_steps: "Souhaitez-vous télécharger une répartition ou recalculer ?",
        },
    }
}

/// Render the localized result summary: monthly payment to the cent, then
/// thousands-grouped breakdown lines and the next-steps question.
pub fn format_breakdown(locale: Locale, b: &PaymentBreakdown) -> String {
    let l = breakdown_labels(locale);
    format!(
        "{calc} 💬\n\n{monthly}: ${payment:.2}\n\n{head}\n• {la_label}: ${la}\n• {ti_label}: ${ti}\n• {tp_label}: ${tp}\n\n{next}",
        calc = l.calculating,
        monthly = l.monthly_payment,
        payment = b.monthly_payment,
        head = l.breakdown,
        la_label = l.loan_amount,
        la = group_thousands(b.loan_amount),
        ti_label = l.total_interest,
        ti = group_thousands(b.total_interest),
        tp_label = l.total_payment,
        tp = group_thousands(b.total_payment),
        next = l.next_steps,
    )
}

/// "1234567.891" -> "1,234,567.89". Rounds to cents and drops a zero
/// fractional part entirely.
fn group_thousands(value: f64) -> String {
    let cents = (value * 100.0).round() / 100.0;
    let formatted = format!("{:.2}", cents.abs());
    let (int_part, frac_part) = formatted.split_once('.').unwrap_or((&formatted, "00"));

    let mut grouped = String::new();
    let digits: Vec<char> = int_part.chars().collect();
    for (i, c) in digits.iter().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(*c);
    }

    let sign = if cents < 0.0 { "-" } else { "" };
    if frac_part == "00" {
        format!("{sign}{grouped}")
    } else {
        format!("{sign}{grouped}.{frac_part}")
    }
}

/// Gateway system instruction per language.
pub fn system_prompt(locale: Locale) -> &'static str {
    match locale {
        Locale::En => {
            "You are a helpful mortgage assistant. Your role is to help users calculate their mortgage payments by collecting necessary information step by step.\n\n\
Key responsibilities:\n\
1. Greet users warmly and explain your purpose\n\
2. Collect property price, down payment, interest rate, and loan term\n\
3. Calculate mortgage payments accurately\n\
4. Provide detailed breakdowns of costs\n\
5. Offer to recalculate or connect to human support\n\
6. Handle errors gracefully with helpful guidance\n\n\
Conversation flow:\n\
- greeting → property_price → down_payment → interest_rate → loan_term → results\n\n\
Be conversational, helpful, and always validate inputs before proceeding. If user input is unclear, ask for clarification."
        }
        Locale::Es => {
            "Eres un asistente hipotecario útil. Tu función es ayudar a los usuarios a calcular sus pagos hipotecarios recopilando la información necesaria paso a paso.\n\n\
Responsabilidades principales:\n\
1. Saluda a los usuarios cálidamente y explica tu propósito\n\
2. Recopila precio de la propiedad, pago inicial, tasa de interés y plazo del préstamo\n\
3. Calcula los pagos hipotecarios con precisión\n\
4. Proporciona desgloses detallados de costos\n\
5. Ofrece recalcular o conectar con soporte humano\n\
6. Maneja errores con gracia y orientación útil\n\n\
Flujo de conversación:\n\
- greeting → property_price → down_payment → interest_rate → loan_term → results\n\n\
Sé conversacional, útil y siempre valida las entradas antes de proceder. Si la entrada del usuario no está clara, pide aclaración."
        }
        Locale::Fr => {
            "Vous êtes un assistant hypothécaire utile. Votre rôle est d'aider les utilisateurs à calculer leurs paiements hypothécaires en recueillant les informations nécessaires étape par étape.\n\n\
Responsabilités principales :\n\
1. Saluez chaleureusement les utilisateurs et expliquez votre objectif\n\
2. Recueillez le prix de la propriété, l'acompte, le taux d'intérêt et la durée du prêt\n\
3. Calculez les paiements hypothécaires avec précision\n\
4. Fournissez des répartitions détaillées des coûts\n\
5. Offrez de recalculer ou de connecter avec le support humain\n\
6. Gérez les erreurs avec grâce et orientation utile\n\n\
Flux de conversation :\n\
- greeting → property_price → down_payment → interest_rate → loan_term → results\n\n\
Soyez conversationnel, utile et validez toujours les entrées avant de procéder. Si l'entrée de l'utilisateur n'est pas claire, demandez des éclaircissements."
        }
    }
}
