// src/noyau/expr.rs
//
// AST du calcul.
// - Nombre : texte brut (entier ou flottant décidé à l’évaluation)
// - Var    : variable / constante / variable liée x
// - Appel  : fonction nommée ; pour integral/deriv le 1er argument reste NON évalué
//
// IMPORTANT :
// - L’arbre est immuable et réentrant : les noyaux numériques ré-évaluent le même
//   noeud des centaines de fois. Aucun état caché, tout passe par la portée.

use std::fmt;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum OpUnaire {
    Neg,
    Id,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum OpBinaire {
    Add,
    Sub,
    Mul,
    Div,
    Mod,
    Pow,
}

impl OpBinaire {
    pub fn depuis_char(c: char) -> Option<OpBinaire> {
        match c {
            '+' => Some(OpBinaire::Add),
            '-' => Some(OpBinaire::Sub),
            '*' => Some(OpBinaire::Mul),
            '/' => Some(OpBinaire::Div),
            '%' => Some(OpBinaire::Mod),
            '^' => Some(OpBinaire::Pow),
            _ => None,
        }
    }

    pub fn symbole(self) -> char {
        match self {
            OpBinaire::Add => '+',
            OpBinaire::Sub => '-',
            OpBinaire::Mul => '*',
            OpBinaire::Div => '/',
            OpBinaire::Mod => '%',
            OpBinaire::Pow => '^',
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
pub enum Noeud {
    Nombre(String),
    Var(String),

    Unaire(OpUnaire, Box<Noeud>),
    Binaire(OpBinaire, Box<Noeud>, Box<Noeud>),

    Appel(String, Vec<Noeud>),

    // La cible reste un noeud : l’évaluation exige une Var nue.
    Affecte(Box<Noeud>, Box<Noeud>),
}

impl Noeud {
    pub fn binaire(op: OpBinaire, a: Noeud, b: Noeud) -> Noeud {
        Noeud::Binaire(op, Box::new(a), Box::new(b))
    }

    pub fn unaire(op: OpUnaire, a: Noeud) -> Noeud {
        Noeud::Unaire(op, Box::new(a))
    }
}

/// Affichage totalement parenthésé (démarche) : aucune ambiguïté de précédence.
impl fmt::Display for Noeud {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Noeud::Nombre(s) | Noeud::Var(s) => write!(f, "{s}"),
            Noeud::Unaire(OpUnaire::Neg, a) => write!(f, "(-{a})"),
            Noeud::Unaire(OpUnaire::Id, a) => write!(f, "(+{a})"),
            Noeud::Binaire(op, a, b) => write!(f, "({a} {} {b})", op.symbole()),
            Noeud::Appel(nom, args) => {
                write!(f, "{nom}(")?;
                for (k, a) in args.iter().enumerate() {
                    if k > 0 {
                        write!(f, ", ")?;
                    }
                    write!(f, "{a}")?;
                }
                write!(f, ")")
            }
            Noeud::Affecte(cible, valeur) => write!(f, "{cible} = {valeur}"),
        }
    }
}
