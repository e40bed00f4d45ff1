//! src/session/etat.rs
//!
//! État de session (sans rendu).
//!
//! Rôle : contenir l’entrée, l’historique, la mémoire, la portée des variables et les réglages,
//! et brancher le bouton "=" sur le noyau.
//!
//! Contrats :
//! - Une session = une portée ; `calculer` l’emprunte en &mut pendant toute l’évaluation.
//! - En cas d’échec, l’entrée devient "Error" (l’erreur précise reste disponible).

use tracing::debug;

use crate::noyau::format::{format_affichage, reel_vers_texte, texte_resultat};
use crate::noyau::{eval_expression, Bibliotheque, ErreurCalc, ModeAngle, Portee, Resultat, Valeur};
use crate::reglages::Reglages;

use super::saisie::preparer_saisie;

/// Texte affiché après un échec.
pub const TEXTE_ERREUR: &str = "Error";

#[derive(Clone, Debug)]
pub struct Session {
    // --- entrée utilisateur ---
    pub entree: String,
    pub nouvelle_saisie: bool, // true juste après "=" : le prochain chiffre remplace

    // --- sorties ---
    pub historique: String, // "<expression> ="
    pub derniere_erreur: Option<ErreurCalc>,

    // --- mémoire M+ / M- / MR ---
    pub memoire: f64,

    portee: Portee,
    reglages: Reglages,
    biblio: Bibliotheque,
}

impl Default for Session {
    fn default() -> Self {
        Self::new(Reglages::default())
    }
}

impl Session {
    pub fn new(reglages: Reglages) -> Self {
        Self {
            entree: "0".to_string(),
            nouvelle_saisie: true,
            historique: String::new(),
            derniere_erreur: None,
            memoire: 0.0,
            portee: Portee::new(),
            reglages,
            biblio: Bibliotheque::standard(),
        }
    }

    pub fn portee(&self) -> &Portee {
        &self.portee
    }

    pub fn portee_mut(&mut self) -> &mut Portee {
        &mut self.portee
    }

    pub fn reglages(&self) -> &Reglages {
        &self.reglages
    }

    pub fn bibliotheque(&self) -> &Bibliotheque {
        &self.biblio
    }

    pub fn set_mode_angle(&mut self, mode: ModeAngle) {
        self.reglages.mode_angle = mode;
    }

    /// "=" : prépare la saisie, évalue, dépose le résultat (ou "Error").
    pub fn calculer(&mut self) -> Resultat<Valeur> {
        let expr = preparer_saisie(&self.entree);

        match eval_expression(&self.biblio, &expr, &mut self.portee, self.reglages.mode_angle) {
            Ok(v) => {
                self.entree = texte_resultat(&v);
                self.historique = format!("{expr} =");
                self.nouvelle_saisie = true;
                self.derniere_erreur = None;
                Ok(v)
            }
            Err(e) => {
                debug!(expr = %expr, erreur = %e, "calcul en échec");
                self.set_erreur(e.clone());
                Err(e)
            }
        }
    }

    /// Choix UX : on garde l’historique (dernier calcul réussi), l’entrée passe à "Error".
    pub fn set_erreur(&mut self, e: ErreurCalc) {
        self.entree = TEXTE_ERREUR.to_string();
        self.nouvelle_saisie = true;
        self.derniere_erreur = Some(e);
    }

    /// C : entrée à "0", historique effacé. Les variables restent.
    pub fn efface_tout(&mut self) {
        self.entree = "0".to_string();
        self.historique.clear();
        self.derniere_erreur = None;
        self.nouvelle_saisie = true;
    }

    /// Rendu écran de l’entrée courante.
    pub fn affichage(&self) -> String {
        format_affichage(&self.entree)
    }

    /* ------------------------ Mémoire ------------------------ */

    pub fn memoire_plus(&mut self) {
        if let Ok(x) = self.entree.parse::<f64>() {
            self.memoire += x;
        }
    }

    pub fn memoire_moins(&mut self) {
        if let Ok(x) = self.entree.parse::<f64>() {
            self.memoire -= x;
        }
    }

    pub fn memoire_rappel(&mut self) {
        self.entree = reel_vers_texte(self.memoire);
        self.nouvelle_saisie = false;
    }
}
