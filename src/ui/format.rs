// ============================================================================
// Formatage des montants et quantités
// ============================================================================
// Devise : roupie indienne avec groupement indien des chiffres
//   1234567.891 -> "₹12,34,567.89"
//
// Quantités : 2 à 6 décimales, notation exponentielle pour les
// valeurs dans ]0, 0.0001[ (ex: "1.2345e-5")
// ============================================================================

const RUPEE: &str = "₹";

/// Groupe une partie entière (chiffres ASCII) à l'indienne :
/// 3 derniers chiffres, puis des paires
///
/// "1234567" -> "12,34,567"
fn group_indian(digits: &str) -> String {
    if digits.len() <= 3 {
        return digits.to_string();
    }

    let (head, tail) = digits.split_at(digits.len() - 3);

    // CONCEPT RUST : chunks sur les bytes, depuis la droite
    // - On inverse, on découpe par 2, on ré-inverse
    let reversed: Vec<u8> = head.bytes().rev().collect();
    let mut groups: Vec<String> = reversed
        .chunks(2)
        .map(|chunk| chunk.iter().rev().map(|&b| b as char).collect())
        .collect();
    groups.reverse();

    format!("{},{}", groups.join(","), tail)
}

/// Formate une valeur absolue avec `decimals` décimales et groupement indien
fn format_grouped(value: f64, decimals: usize) -> String {
    let fixed = format!("{:.*}", decimals, value.abs());

    match fixed.split_once('.') {
        Some((int_part, frac)) => format!("{}.{}", group_indian(int_part), frac),
        None => group_indian(&fixed),
    }
}

/// Vrai si `value` s'affiche comme zéro une fois arrondi
fn rounds_to_zero(value: f64, decimals: usize) -> bool {
    let factor = 10f64.powi(decimals as i32);
    (value.abs() * factor).round() == 0.0
}

/// Montant en roupies : "₹1,23,456.70", "-₹200"
pub fn format_currency(amount: f64, decimals: usize) -> String {
    let sign = if amount < 0.0 && !rounds_to_zero(amount, decimals) { "-" } else { "" };
    format!("{}{}{}", sign, RUPEE, format_grouped(amount, decimals))
}

/// Quantité de coins
pub fn format_number(num: f64) -> String {
    if num > 0.0 && num < 0.0001 {
        return format!("{:.4e}", num);
    }

    let fixed = format_grouped(num, 6);

    // Retire les zéros finaux au-delà de la 2e décimale
    let (int_part, frac) = fixed.split_once('.').unwrap_or((fixed.as_str(), ""));
    let mut frac = frac.trim_end_matches('0').to_string();
    while frac.len() < 2 {
        frac.push('0');
    }

    let sign = if num < 0.0 { "-" } else { "" };
    format!("{}{}.{}", sign, int_part, frac)
}

/// Magnitude avec marqueur de signe explicite : "- ₹200" pour -200
///
/// La valeur reste signée côté calcul ; seul l'affichage retire le signe
/// et remet un "-" devant.
pub fn signed_magnitude(value: f64, decimals: usize) -> String {
    if value < 0.0 && !rounds_to_zero(value, decimals) {
        format!("- {}", format_currency(value.abs(), decimals))
    } else {
        format_currency(value.abs(), decimals)
    }
}

/// Perte affichée comme montant négatif : "- ₹1,548"
pub fn format_loss(losses: f64, decimals: usize) -> String {
    format!("- {}", format_currency(losses, decimals))
}

/// Le gain s'affiche-t-il comme positif (ou nul) une fois arrondi ?
///
/// -0.001 à 2 décimales s'affiche "₹0.00" : il compte comme un gain nul
pub fn is_displayed_gain(gain: f64, decimals: usize) -> bool {
    gain >= 0.0 || rounds_to_zero(gain, decimals)
}

/// Gain d'une ligne du tableau : "+₹49.96" ou "-₹1.30"
pub fn format_gain(gain: f64, decimals: usize) -> String {
    if is_displayed_gain(gain, decimals) {
        format!("+{}", format_currency(gain, decimals))
    } else {
        format_currency(gain, decimals)
    }
}
