//! Native source fixtures.

/// A single exported point-in-polygon query.
pub const POINT_IN_POLY_CPP: &str = r#"#include "stdafx.h"

RH_C_FUNCTION bool RHC_PointInPoly(ON_3dPoint pt, int count, /*ARRAY*/const ON_3dPoint* pts)
{
  return false;
}
"#;

/// Mesh functions: a handle return, an enum parameter, a function pointer,
/// an excluded helper and one enum declaration.
pub const MESH_CPP: &str = r#"#include "stdafx.h"

enum MeshIntConst : int
{
  micVertexCount,
  micFaceCount
};

RH_C_FUNCTION ON_Mesh* ON_Mesh_New(const ON_Mesh* pOther)
{
  if( pOther )
    return new ON_Mesh(*pOther);
  return new ON_Mesh();
}

RH_C_FUNCTION int ON_Mesh_GetInt(const ON_Mesh* pConstMesh, enum MeshIntConst which)
{
  int rc = 0;
  if( pConstMesh && which == micVertexCount )
    rc = pConstMesh->VertexCount();
  return rc;
}

//RH_C_FUNCTION void ON_Mesh_Destroy(ON_Mesh* pMesh)

/*MANUAL*/RH_C_FUNCTION void ON_Mesh_Dump(const ON_Mesh* pConstMesh, ON_TextLog* log)
{
}

RH_C_FUNCTION void ON_Mesh_SetCallback(ON_Mesh* pMesh, MESHPROC callback)
{
}
"#;
