//! Route table
//!
//! Routes keep the original hash paths. Unknown paths resolve to the
//! not-found view; the default route is the dashboard.

/// Application sections
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Route {
    #[default]
    Dashboard,
    Citas,
    Clientes,
    Servicios,
    Facturas,
    Inventario,
    Config,
    Respaldo,
    Busqueda,
    NotFound,
}

impl Route {
    /// Sidebar entries, in display order
    pub const NAV: [Route; 8] = [
        Route::Dashboard,
        Route::Citas,
        Route::Clientes,
        Route::Servicios,
        Route::Facturas,
        Route::Inventario,
        Route::Config,
        Route::Respaldo,
    ];

    pub fn path(&self) -> &'static str {
        match self {
            Route::Dashboard => "/dashboard",
            Route::Citas => "/citas",
            Route::Clientes => "/clientes",
            Route::Servicios => "/servicios",
            Route::Facturas => "/facturas",
            Route::Inventario => "/inventario",
            Route::Config => "/config",
            Route::Respaldo => "/respaldo",
            Route::Busqueda => "/buscar",
            Route::NotFound => "/404",
        }
    }

    /// Resolve a path. Empty resolves to the dashboard, anything
    /// unknown to the not-found view.
    pub fn resolve(path: &str) -> Route {
        if path.is_empty() {
            return Route::Dashboard;
        }
        Route::NAV
            .iter()
            .copied()
            .chain([Route::Busqueda])
            .find(|r| r.path() == path)
            .unwrap_or(Route::NotFound)
    }

    pub fn title(&self) -> &'static str {
        match self {
            Route::Dashboard => "Dashboard",
            Route::Citas => "Citas",
            Route::Clientes => "Clientes",
            Route::Servicios => "Servicios",
            Route::Facturas => "Facturación",
            Route::Inventario => "Inventario",
            Route::Config => "Configuración",
            Route::Respaldo => "Respaldo",
            Route::Busqueda => "Resultados",
            Route::NotFound => "No encontrado",
        }
    }

    /// Section for a number key (1-8), matching sidebar order
    pub fn from_digit(digit: char) -> Option<Route> {
        digit
            .to_digit(10)
            .and_then(|n| n.checked_sub(1))
            .and_then(|i| Route::NAV.get(i as usize).copied())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn resolves_known_paths() {
        assert_eq!(Route::resolve("/citas"), Route::Citas);
        assert_eq!(Route::resolve(""), Route::Dashboard);
        assert_eq!(Route::resolve("/nope"), Route::NotFound);
    }

    #[test]
    fn paths_roundtrip() {
        for route in Route::NAV {
            assert_eq!(Route::resolve(route.path()), route);
        }
    }

    #[test]
    fn digits_follow_nav_order() {
        assert_eq!(Route::from_digit('1'), Some(Route::Dashboard));
        assert_eq!(Route::from_digit('8'), Some(Route::Respaldo));
        assert_eq!(Route::from_digit('9'), None);
        assert_eq!(Route::from_digit('0'), None);
    }
}
